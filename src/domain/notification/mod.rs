//! Notification domain - Push registrations, payloads, and delivery results.
//!
//! Knows nothing about billing: the dispatcher only sees a member id and a
//! payload, and reports what happened per device.

mod delivery;
mod message;
mod subscription;

pub use delivery::{DeliveryOutcome, DeliveryReport};
pub use message::{NotificationKind, NotificationPayload, ReminderMessages};
pub use subscription::{dedupe_by_endpoint, PushKeys, PushSubscription};
