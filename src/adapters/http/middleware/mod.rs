//! HTTP middleware for axum.
//!
//! - `auth` - Shared-secret bearer check for scheduler-triggered endpoints

pub mod auth;

pub use auth::{cron_auth_middleware, CronSecret};
