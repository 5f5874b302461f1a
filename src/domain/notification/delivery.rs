//! Per-member delivery results.

use serde::Serialize;

/// Classified result of one send to one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// The push service reported the endpoint permanently gone.
    Gone,
    /// Any other failure, including timeouts. Never triggers cleanup.
    Failed,
}

/// Counts for one member's fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failed: usize,
    pub had_no_targets: bool,
    /// Endpoints reported gone (a subset of `failed`).
    pub expired: usize,
}

impl DeliveryReport {
    /// Member has no registered devices; not an error.
    pub fn no_targets() -> Self {
        Self {
            had_no_targets: true,
            ..Self::default()
        }
    }

    pub fn from_outcomes(outcomes: &[DeliveryOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut report, outcome| {
            match outcome {
                DeliveryOutcome::Delivered => report.sent += 1,
                DeliveryOutcome::Gone => {
                    report.failed += 1;
                    report.expired += 1;
                }
                DeliveryOutcome::Failed => report.failed += 1,
            }
            report
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_targets_report_is_empty() {
        let report = DeliveryReport::no_targets();
        assert!(report.had_no_targets);
        assert_eq!((report.sent, report.failed, report.expired), (0, 0, 0));
    }

    #[test]
    fn gone_counts_as_failed_and_expired() {
        let report = DeliveryReport::from_outcomes(&[
            DeliveryOutcome::Delivered,
            DeliveryOutcome::Gone,
            DeliveryOutcome::Failed,
        ]);
        assert_eq!(report.sent, 1);
        assert_eq!(report.failed, 2);
        assert_eq!(report.expired, 1);
        assert!(!report.had_no_targets);
    }
}
