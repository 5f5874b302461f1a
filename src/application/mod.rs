//! Application layer - Command handlers and services.
//!
//! This layer orchestrates domain rules and coordinates between ports.

pub mod handlers;

pub use handlers::{
    NotificationDispatcher, RunBillingCycleCommand, RunBillingCycleHandler,
};
