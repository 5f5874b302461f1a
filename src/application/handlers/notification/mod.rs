//! Notification handlers.
//!
//! The dispatcher fans one payload out to every device of one member and
//! reconciles registrations the push service reports as gone.

mod dispatcher;

pub use dispatcher::NotificationDispatcher;
