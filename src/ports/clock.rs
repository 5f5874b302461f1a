//! Clock port.

use chrono::NaiveDate;

/// Source of "today" for calendar-driven rule resolution.
pub trait Clock: Send + Sync {
    /// Current date in UTC.
    fn today(&self) -> NaiveDate;
}
