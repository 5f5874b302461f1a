//! Billing domain - Members, payment status, and the monthly rule set.
//!
//! The billing cycle is driven by three calendar rules. Two of them only
//! remind members who have not paid yet; the third rolls the cycle over,
//! escalating unpaid members to overdue and reopening the fee for everyone
//! who had paid.

mod member;
mod rule;
mod status;
mod summary;

pub use member::Member;
pub use rule::{BillingCalendar, BillingRule};
pub use status::PaymentStatus;
pub use summary::ActionSummary;
