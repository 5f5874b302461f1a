//! Billing cycle configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::billing::BillingCalendar;

/// Billing cycle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Bearer secret the scheduler presents on every trigger
    pub cron_secret: SecretString,

    /// Public base URL of the member app, used for notification deep links
    pub app_url: String,

    /// Title shown on every notification
    #[serde(default = "default_club_name")]
    pub club_name: String,

    /// Day of month for the first reminder
    #[serde(default = "default_reminder_first_day")]
    pub reminder_first_day: u32,

    /// Day of month for the final reminder
    #[serde(default = "default_reminder_final_day")]
    pub reminder_final_day: u32,

    /// Day of month the cycle rolls over
    #[serde(default = "default_rollover_day")]
    pub rollover_day: u32,
}

impl BillingConfig {
    pub fn calendar(&self) -> BillingCalendar {
        BillingCalendar::new(
            self.reminder_first_day,
            self.reminder_final_day,
            self.rollover_day,
        )
    }

    /// Validate billing configuration
    pub fn validate(&self, env: &Environment) -> Result<(), ValidationError> {
        if self.cron_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("BILLING__CRON_SECRET"));
        }
        if self.cron_secret.expose_secret().len() < 16 {
            return Err(ValidationError::WeakCronSecret);
        }

        if !self.app_url.starts_with("http://") && !self.app_url.starts_with("https://") {
            return Err(ValidationError::InvalidAppUrl);
        }
        if *env == Environment::Production && !self.app_url.starts_with("https://") {
            return Err(ValidationError::AppUrlMustBeHttps);
        }

        let days = [
            self.reminder_first_day,
            self.reminder_final_day,
            self.rollover_day,
        ];
        if let Some(day) = days.iter().find(|d| !(1..=31).contains(*d)) {
            return Err(ValidationError::InvalidBillingDay(*day));
        }
        if days[0] == days[1] || days[0] == days[2] || days[1] == days[2] {
            return Err(ValidationError::DuplicateBillingDay);
        }

        Ok(())
    }
}

fn default_club_name() -> String {
    "Smart Club".to_string()
}

fn default_reminder_first_day() -> u32 {
    25
}

fn default_reminder_final_day() -> u32 {
    29
}

fn default_rollover_day() -> u32 {
    1
}
