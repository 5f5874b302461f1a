//! Billing rules and the calendar that schedules them.
//!
//! A rule is resolved in two stages: an explicitly requested rule wins,
//! otherwise the UTC day-of-month is looked up in the [`BillingCalendar`].
//! "No rule today" is an ordinary `None`, never an error.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One of the three scheduled billing-cycle policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingRule {
    /// Early reminder to members whose fee is open.
    ReminderFirst,

    /// Last reminder before the cycle rolls over.
    ReminderFinal,

    /// Escalate open fees to overdue, then reopen paid fees.
    CycleRollover,
}

impl BillingRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingRule::ReminderFirst => "reminder_first",
            BillingRule::ReminderFinal => "reminder_final",
            BillingRule::CycleRollover => "cycle_rollover",
        }
    }

    /// Resolves the rule for a run.
    ///
    /// A known `requested` name is used verbatim regardless of the date.
    /// Absent or unknown names fall back to the calendar.
    pub fn resolve(
        requested: Option<&str>,
        calendar: &BillingCalendar,
        today: NaiveDate,
    ) -> Option<BillingRule> {
        requested
            .and_then(|name| name.parse().ok())
            .or_else(|| calendar.rule_for(today))
    }
}

impl fmt::Display for BillingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for names that are not one of the three rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown billing rule '{0}'")]
pub struct UnknownRule(pub String);

impl FromStr for BillingRule {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reminder_first" => Ok(BillingRule::ReminderFirst),
            "reminder_final" => Ok(BillingRule::ReminderFinal),
            "cycle_rollover" => Ok(BillingRule::CycleRollover),
            other => Err(UnknownRule(other.to_string())),
        }
    }
}

/// Days of the month on which each rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingCalendar {
    pub reminder_first_day: u32,
    pub reminder_final_day: u32,
    pub rollover_day: u32,
}

impl BillingCalendar {
    pub fn new(reminder_first_day: u32, reminder_final_day: u32, rollover_day: u32) -> Self {
        Self {
            reminder_first_day,
            reminder_final_day,
            rollover_day,
        }
    }

    /// Rule scheduled for the given date, if any.
    pub fn rule_for(&self, date: NaiveDate) -> Option<BillingRule> {
        let day = date.day();
        if day == self.reminder_first_day {
            Some(BillingRule::ReminderFirst)
        } else if day == self.reminder_final_day {
            Some(BillingRule::ReminderFinal)
        } else if day == self.rollover_day {
            Some(BillingRule::CycleRollover)
        } else {
            None
        }
    }
}

impl Default for BillingCalendar {
    fn default() -> Self {
        Self::new(25, 29, 1)
    }
}
