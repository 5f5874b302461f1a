//! HTTP listener settings for the cron endpoint.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Longest a single trigger may run before the listener answers 408.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 900;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address, e.g. `0.0.0.0:8080`
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Upper bound for one billing run, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Deployment environment. Production switches logs to JSON and
/// requires an HTTPS app URL.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bind_addr.port() == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        EnvFilter::try_new(&self.log_filter)
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            environment: Environment::default(),
            log_filter: default_log_filter(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_log_filter() -> String {
    "info,club_billing=debug,sqlx=warn".to_string()
}

fn default_request_timeout() -> u64 {
    300
}
