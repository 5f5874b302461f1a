//! HTTP adapter for the scheduled billing trigger.
//!
//! - `POST /api/cron/billing` - Run the billing cycle (bearer secret required)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{RunBillingRequest, RunBillingResponse};
pub use handlers::{run_billing_cycle, BillingAppState};
pub use routes::billing_router;
