//! Billing handlers.
//!
//! The scheduled billing cycle: resolve the rule for today, apply its status
//! transitions with guarded bulk updates, and notify the affected members.

mod run_billing_cycle;

pub use run_billing_cycle::{RunBillingCycleCommand, RunBillingCycleHandler};
