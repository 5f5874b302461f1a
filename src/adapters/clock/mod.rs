//! System clock adapter.

use chrono::{NaiveDate, Utc};

use crate::ports::Clock;

/// Reads the current UTC date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
