//! Web Push transport adapter.
//!
//! Encrypts the payload for the client (RFC 8291, aes128gcm) and signs a
//! VAPID token with the `web-push` crate, then posts the resulting request
//! to the push service with `reqwest`. The response status is returned
//! unchanged so the dispatcher can classify it.
//!
//! # Configuration
//!
//! ```ignore
//! let config = WebPushConfig::new(vapid_private_key, "mailto:noreply@club.example");
//! let transport = WebPushTransport::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use web_push::{
    request_builder, ContentEncoding, SubscriptionInfo, VapidSignatureBuilder,
    WebPushMessageBuilder, URL_SAFE_NO_PAD,
};

use crate::domain::notification::PushKeys;
use crate::ports::{PushError, PushTransport};

/// Longest response body kept for logging.
const MAX_ERROR_BODY: usize = 512;

/// VAPID and delivery settings.
#[derive(Clone)]
pub struct WebPushConfig {
    /// Application server private key (base64url, raw P-256 scalar).
    vapid_private_key: SecretString,

    /// Contact for the push service operator (`mailto:` or `https:`).
    subject: String,

    /// How long the push service may hold an undelivered message.
    ttl: Duration,
}

impl WebPushConfig {
    pub fn new(vapid_private_key: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            vapid_private_key: SecretString::new(vapid_private_key.into()),
            subject: subject.into(),
            ttl: Duration::from_secs(24 * 60 * 60),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Sends Web Push messages over HTTPS.
pub struct WebPushTransport {
    config: WebPushConfig,
    http_client: reqwest::Client,
}

impl WebPushTransport {
    pub fn new(config: WebPushConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn build_message(
        &self,
        endpoint: &str,
        keys: &PushKeys,
        payload: &[u8],
    ) -> Result<web_push::WebPushMessage, PushError> {
        let subscription = SubscriptionInfo::new(endpoint, keys.p256dh.as_str(), keys.auth.as_str());

        let mut signature = VapidSignatureBuilder::from_base64(
            self.config.vapid_private_key.expose_secret(),
            URL_SAFE_NO_PAD,
            &subscription,
        )
        .map_err(|e| PushError::Encryption(format!("Invalid VAPID key: {}", e)))?;
        signature.add_claim("sub", self.config.subject.as_str());
        let signature = signature
            .build()
            .map_err(|e| PushError::Encryption(format!("Failed to sign VAPID token: {}", e)))?;

        let mut builder = WebPushMessageBuilder::new(&subscription);
        builder.set_payload(ContentEncoding::Aes128Gcm, payload);
        builder.set_vapid_signature(signature);
        builder.set_ttl(self.config.ttl.as_secs().min(u32::MAX as u64) as u32);

        builder
            .build()
            .map_err(|e| PushError::Encryption(format!("Failed to encrypt payload: {}", e)))
    }
}

#[async_trait]
impl PushTransport for WebPushTransport {
    async fn send(
        &self,
        endpoint: &str,
        keys: &PushKeys,
        payload: &[u8],
    ) -> Result<(), PushError> {
        let message = self.build_message(endpoint, keys, payload)?;
        let request = request_builder::build_request::<Vec<u8>>(message);

        let mut outbound = self.http_client.post(request.uri().to_string());
        for (name, value) in request.headers() {
            outbound = outbound.header(name.as_str(), value.as_bytes());
        }

        let response = outbound
            .body(request.into_body())
            .send()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let mut body = response.text().await.unwrap_or_default();
        if let Some((idx, _)) = body.char_indices().nth(MAX_ERROR_BODY) {
            body.truncate(idx);
        }

        Err(PushError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_vapid_key_is_an_encryption_error() {
        let transport = WebPushTransport::new(WebPushConfig::new(
            "not-a-key",
            "mailto:noreply@club.example",
        ));
        let keys = PushKeys {
            p256dh: "BPub".to_string(),
            auth: "auth".to_string(),
        };

        match transport.build_message("https://push.example/a", &keys, b"{}") {
            Err(err) => {
                assert!(matches!(err, PushError::Encryption(_)));
                assert!(!err.is_gone());
            }
            Ok(_) => panic!("expected an encryption error"),
        }
    }

    // P-256 scalar 0x0101..01; client key is the curve generator.
    const VAPID_PRIVATE_KEY: &str = "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE";
    const CLIENT_P256DH: &str =
        "BGsX0fLhLEJH-Lzm5WOkQPJ3A32BLeszoPShOUXYmMKWT-NC4v4af5uOfrtKfA-eFivOM1drMV7Oy7ZAaDe_UfU";
    const CLIENT_AUTH: &str = "AAECAwQFBgcICQoLDA0ODw";

    #[test]
    fn valid_keys_produce_signed_encrypted_request() {
        let transport = WebPushTransport::new(
            WebPushConfig::new(VAPID_PRIVATE_KEY, "mailto:noreply@club.example")
                .with_ttl(Duration::from_secs(3600)),
        );
        let keys = PushKeys {
            p256dh: CLIENT_P256DH.to_string(),
            auth: CLIENT_AUTH.to_string(),
        };

        let message = match transport.build_message(
            "https://push.example/send/abc",
            &keys,
            br#"{"title":"Smart Club","body":"Reminder"}"#,
        ) {
            Ok(message) => message,
            Err(e) => panic!("expected a message, got {}", e),
        };
        let request = request_builder::build_request::<Vec<u8>>(message);

        assert_eq!(request.uri().to_string(), "https://push.example/send/abc");
        assert_eq!(request.headers()["TTL"], "3600");
        assert_eq!(request.headers()["Content-Encoding"], "aes128gcm");
        let authorization = request.headers()["Authorization"].to_str().unwrap();
        assert!(authorization.starts_with("vapid"));
        assert!(!request.body().is_empty());
    }
}
