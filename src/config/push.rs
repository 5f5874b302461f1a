//! Web Push configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Web Push (VAPID) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    /// Application server public key, handed to browsers at subscribe time
    pub vapid_public_key: String,

    /// Application server private key (base64url)
    pub vapid_private_key: SecretString,

    /// Operator contact sent in the VAPID `sub` claim
    pub vapid_subject: String,

    /// How long a push service may queue an undelivered message
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Per-send timeout in seconds
    #[serde(default = "default_send_timeout")]
    pub send_timeout_secs: u64,
}

impl PushConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    /// Validate push configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.vapid_public_key.is_empty() {
            return Err(ValidationError::MissingRequired("PUSH__VAPID_PUBLIC_KEY"));
        }
        if self.vapid_private_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PUSH__VAPID_PRIVATE_KEY"));
        }
        if !self.vapid_subject.starts_with("mailto:") && !self.vapid_subject.starts_with("https://")
        {
            return Err(ValidationError::InvalidVapidSubject);
        }
        if self.send_timeout_secs == 0 || self.send_timeout_secs > 120 {
            return Err(ValidationError::InvalidSendTimeout);
        }
        Ok(())
    }
}

fn default_ttl() -> u64 {
    24 * 60 * 60
}

fn default_send_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PushConfig {
        PushConfig {
            vapid_public_key: "BPublicKey".to_string(),
            vapid_private_key: SecretString::new("private-key".to_string()),
            vapid_subject: "mailto:treasurer@club.example".to_string(),
            ttl_secs: default_ttl(),
            send_timeout_secs: default_send_timeout(),
        }
    }

    #[test]
    fn accepts_mailto_and_https_subjects() {
        assert!(config().validate().is_ok());

        let https = PushConfig {
            vapid_subject: "https://club.example".to_string(),
            ..config()
        };
        assert!(https.validate().is_ok());
    }

    #[test]
    fn rejects_bare_subject() {
        let config = PushConfig {
            vapid_subject: "treasurer@club.example".to_string(),
            ..config()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidVapidSubject)));
    }

    #[test]
    fn rejects_missing_private_key() {
        let config = PushConfig {
            vapid_private_key: SecretString::new(String::new()),
            ..config()
        };
        assert!(matches!(config.validate(), Err(ValidationError::MissingRequired(_))));
    }

    #[test]
    fn rejects_zero_send_timeout() {
        let config = PushConfig {
            send_timeout_secs: 0,
            ..config()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidSendTimeout)));
    }

    #[test]
    fn durations_follow_seconds() {
        let config = config();
        assert_eq!(config.ttl(), Duration::from_secs(86_400));
        assert_eq!(config.send_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn debug_output_redacts_private_key() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("private-key"));
    }
}
