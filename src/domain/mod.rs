//! Domain layer - Billing rules, payment status, and notification types.
//!
//! Pure types and rules with no I/O. Everything that talks to a database or
//! a push service goes through `crate::ports`.

pub mod billing;
pub mod foundation;
pub mod notification;
