//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the billing core and the outside world. Adapters implement these ports.
//!
//! - `MemberStatusStore` - Payment status reads and guarded bulk updates
//! - `SubscriptionStore` - Push registration reads and cleanup
//! - `PushTransport` - Opaque encrypted send to one endpoint
//! - `Clock` - Current UTC date for rule resolution

mod clock;
mod member_status_store;
mod push_transport;
mod subscription_store;

pub use clock::Clock;
pub use member_status_store::MemberStatusStore;
pub use push_transport::{PushError, PushTransport, GONE_STATUS};
pub use subscription_store::SubscriptionStore;
