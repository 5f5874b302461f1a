//! HTTP DTOs for the billing trigger.

use serde::{Deserialize, Serialize};

use crate::domain::billing::{ActionSummary, BillingRule};

/// Optional body of a trigger request.
///
/// `type` is kept as a raw string: unknown names fall back to the calendar
/// rather than failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunBillingRequest {
    #[serde(rename = "type", default)]
    pub rule: Option<String>,

    #[serde(rename = "isDemo", default)]
    pub is_demo: Option<bool>,
}

impl RunBillingRequest {
    /// Parses a raw body, treating empty or malformed input as "no overrides".
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Ignoring malformed trigger body");
            Self::default()
        })
    }

    /// Requested rule name, passed on unparsed for the handler to resolve.
    pub fn requested_rule(&self) -> Option<String> {
        self.rule.clone()
    }

    pub fn dry_run(&self) -> bool {
        self.is_demo.unwrap_or(false)
    }
}

/// Response body of an authorized trigger.
#[derive(Debug, Clone, Serialize)]
pub struct RunBillingResponse {
    pub ok: bool,
    #[serde(rename = "type")]
    pub rule: Option<BillingRule>,
    #[serde(rename = "isDemo")]
    pub is_demo: bool,
    pub actions: Vec<String>,
}

impl From<ActionSummary> for RunBillingResponse {
    fn from(summary: ActionSummary) -> Self {
        Self {
            ok: true,
            rule: summary.rule,
            is_demo: summary.dry_run,
            actions: summary.actions,
        }
    }
}
