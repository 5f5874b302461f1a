//! Push transport adapters.

mod web_push_transport;

pub use web_push_transport::{WebPushConfig, WebPushTransport};
