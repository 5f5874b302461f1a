//! Application configuration module
//!
//! Configuration is read from environment variables with the `CLUB_BILLING`
//! prefix; nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use club_billing::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod billing;
mod database;
mod error;
mod push;
mod server;

pub use billing::BillingConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use push::PushConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener configuration (bind address, environment, log filter)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Web Push configuration (VAPID keys)
    pub push: PushConfig,

    /// Billing cycle configuration (cron secret, calendar, deep links)
    pub billing: BillingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `CLUB_BILLING__*` variables:
    ///
    /// - `CLUB_BILLING__SERVER__BIND_ADDR=0.0.0.0:8080` -> `server.bind_addr`
    /// - `CLUB_BILLING__BILLING__CRON_SECRET=...` -> `billing.cron_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLUB_BILLING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.push.validate()?;
        self.billing.validate(&self.server.environment)?;
        if self.server.request_timeout() <= self.push.send_timeout() {
            return Err(ValidationError::RequestTimeoutTooShort);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[(&str, &str)] = &[
        ("CLUB_BILLING__DATABASE__URL", "postgresql://club@localhost/club"),
        ("CLUB_BILLING__PUSH__VAPID_PUBLIC_KEY", "BPublicKey"),
        ("CLUB_BILLING__PUSH__VAPID_PRIVATE_KEY", "private-key"),
        ("CLUB_BILLING__PUSH__VAPID_SUBJECT", "mailto:treasurer@club.example"),
        ("CLUB_BILLING__BILLING__CRON_SECRET", "a-long-enough-cron-secret"),
        ("CLUB_BILLING__BILLING__APP_URL", "https://app.club.example"),
    ];

    const OPTIONAL: &[&str] = &[
        "CLUB_BILLING__SERVER__BIND_ADDR",
        "CLUB_BILLING__SERVER__REQUEST_TIMEOUT_SECS",
        "CLUB_BILLING__SERVER__ENVIRONMENT",
        "CLUB_BILLING__BILLING__ROLLOVER_DAY",
        "CLUB_BILLING__BILLING__CLUB_NAME",
    ];

    fn set_minimal_env() {
        for (key, value) in VARS {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for (key, _) in VARS {
            env::remove_var(key);
        }
        for key in OPTIONAL {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://club@localhost/club");
        assert_eq!(config.billing.app_url, "https://app.club.example");
        assert_eq!(
            config.billing.cron_secret.expose_secret(),
            "a-long-enough-cron-secret"
        );
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.bind_addr.port(), 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.billing.club_name, "Smart Club");
        assert_eq!(config.billing.reminder_first_day, 25);
        assert_eq!(config.billing.reminder_final_day, 29);
        assert_eq!(config.billing.rollover_day, 1);
        assert_eq!(config.push.send_timeout_secs, 10);
    }

    #[test]
    fn test_calendar_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CLUB_BILLING__BILLING__ROLLOVER_DAY", "3");
        env::set_var("CLUB_BILLING__BILLING__CLUB_NAME", "FC Example");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.billing.rollover_day, 3);
        assert_eq!(config.billing.club_name, "FC Example");
    }

    #[test]
    fn test_missing_cron_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::remove_var("CLUB_BILLING__BILLING__CRON_SECRET");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    fn test_bind_addr_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CLUB_BILLING__SERVER__BIND_ADDR", "127.0.0.1:9090");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_request_timeout_must_outlast_push_send() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CLUB_BILLING__SERVER__REQUEST_TIMEOUT_SECS", "10");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::RequestTimeoutTooShort)
        ));
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CLUB_BILLING__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }
}
