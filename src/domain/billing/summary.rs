//! Structured result of one billing run.

use serde::Serialize;

use super::BillingRule;

/// Ordered, human-readable record of what a billing run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSummary {
    pub rule: Option<BillingRule>,
    pub dry_run: bool,
    pub actions: Vec<String>,
}

impl ActionSummary {
    pub fn new(rule: Option<BillingRule>, dry_run: bool) -> Self {
        Self {
            rule,
            dry_run,
            actions: Vec::new(),
        }
    }

    /// Appends one action description.
    pub fn record(&mut self, action: impl Into<String>) {
        self.actions.push(action.into());
    }
}
