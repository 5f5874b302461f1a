//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the billing core to external systems:
//! - `postgres` - sqlx-backed member and subscription stores
//! - `in_memory` - Store implementations for development and tests
//! - `push` - Web Push transport over reqwest
//! - `clock` - System UTC clock
//! - `http` - Axum entry point for the scheduled trigger

pub mod clock;
pub mod http;
pub mod in_memory;
pub mod postgres;
pub mod push;

pub use clock::SystemClock;
pub use in_memory::{InMemoryMemberStatusStore, InMemorySubscriptionStore};
pub use postgres::{PostgresMemberStatusStore, PostgresSubscriptionStore};
pub use push::{WebPushConfig, WebPushTransport};
