//! In-memory store adapters.
//!
//! Behave like the PostgreSQL stores, including the guarded bulk update.
//! Useful for local development and tests.

mod member_status_store;
mod subscription_store;

pub use member_status_store::InMemoryMemberStatusStore;
pub use subscription_store::InMemorySubscriptionStore;
