//! Push transport port.
//!
//! Treated as an opaque "encrypt and send" primitive. The only status code
//! the core interprets is [`GONE_STATUS`].

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::PushKeys;

/// Push service status meaning the registration no longer exists.
pub const GONE_STATUS: u16 = 410;

/// Failure of a single send.
#[derive(Debug, Clone, Error)]
pub enum PushError {
    #[error("Push service rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Push send timed out")]
    Timeout,

    #[error("Push transport error: {0}")]
    Transport(String),

    #[error("Failed to encrypt or sign payload: {0}")]
    Encryption(String),
}

impl PushError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PushError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True only when the push service reports the endpoint permanently gone.
    pub fn is_gone(&self) -> bool {
        self.status_code() == Some(GONE_STATUS)
    }
}

/// Sends one encrypted payload to one endpoint.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send(&self, endpoint: &str, keys: &PushKeys, payload: &[u8])
        -> Result<(), PushError>;
}
