//! Application handlers.
//!
//! - `billing` - The scheduled billing-cycle state machine
//! - `notification` - Per-member push fan-out

pub mod billing;
pub mod notification;

pub use billing::{RunBillingCycleCommand, RunBillingCycleHandler};
pub use notification::NotificationDispatcher;
