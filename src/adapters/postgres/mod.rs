//! PostgreSQL adapters - Database implementations for the store ports.
//!
//! - `PostgresMemberStatusStore` - Status reads and guarded bulk updates on `members`
//! - `PostgresSubscriptionStore` - Reads and cleanup on `push_subscriptions`
//!
//! Schema lives in `migrations/`.

mod member_status_store;
mod subscription_store;

pub use member_status_store::PostgresMemberStatusStore;
pub use subscription_store::PostgresSubscriptionStore;
