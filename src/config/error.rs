//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),

    #[error("Request timeout must exceed the push send timeout")]
    RequestTimeoutTooShort,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (50)")]
    PoolSizeTooLarge,

    #[error("Cron secret is too short (minimum 16 characters)")]
    WeakCronSecret,

    #[error("App URL must be absolute (http:// or https://)")]
    InvalidAppUrl,

    #[error("App URL must use HTTPS in production")]
    AppUrlMustBeHttps,

    #[error("Billing day {0} is outside 1..=31")]
    InvalidBillingDay(u32),

    #[error("Billing days must be distinct")]
    DuplicateBillingDay,

    #[error("VAPID subject must start with mailto: or https://")]
    InvalidVapidSubject,

    #[error("Invalid push send timeout")]
    InvalidSendTimeout,
}
