//! Payment status state machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, StateMachine};

/// Membership-fee status of a member for the current cycle.
///
/// Exactly one status holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Fee for the current cycle has been received.
    Paid,

    /// Fee for the current cycle is still open.
    Warning,

    /// A full cycle passed without payment.
    Overdue,
}

impl PaymentStatus {
    /// All statuses, in cycle order.
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Paid,
        PaymentStatus::Warning,
        PaymentStatus::Overdue,
    ];

    /// Persisted text representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Warning => "warning",
            PaymentStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(PaymentStatus::Paid),
            "warning" => Ok(PaymentStatus::Warning),
            "overdue" => Ok(PaymentStatus::Overdue),
            other => Err(DomainError::validation(
                "status",
                format!("Unknown payment status '{}'", other),
            )),
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            // Cycle rollover reopens the fee
            (Paid, Warning)
            // Cycle rollover escalates an unpaid fee
                | (Warning, Overdue)
            // Manual payment
                | (Warning, Paid)
                | (Overdue, Paid)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Paid => vec![Warning],
            Warning => vec![Overdue, Paid],
            Overdue => vec![Paid],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollover_transitions_are_valid() {
        assert_eq!(
            PaymentStatus::Warning.transition_to(PaymentStatus::Overdue).unwrap(),
            PaymentStatus::Overdue
        );
        assert_eq!(
            PaymentStatus::Paid.transition_to(PaymentStatus::Warning).unwrap(),
            PaymentStatus::Warning
        );
    }

    #[test]
    fn paid_cannot_jump_straight_to_overdue() {
        assert!(PaymentStatus::Paid.transition_to(PaymentStatus::Overdue).is_err());
    }

    #[test]
    fn overdue_only_leaves_through_payment() {
        assert_eq!(PaymentStatus::Overdue.valid_transitions(), vec![PaymentStatus::Paid]);
        assert!(!PaymentStatus::Overdue.can_transition_to(&PaymentStatus::Warning));
    }

    #[test]
    fn no_status_is_terminal() {
        for status in PaymentStatus::ALL {
            assert!(!status.is_terminal(), "{:?} should have an exit", status);
        }
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in PaymentStatus::ALL {
            for target in PaymentStatus::ALL {
                assert_eq!(
                    status.can_transition_to(&target),
                    status.valid_transitions().contains(&target),
                    "{:?} -> {:?}",
                    status,
                    target
                );
            }
        }
    }

    #[test]
    fn parses_persisted_text() {
        for status in PaymentStatus::ALL {
            assert_eq!(status.as_str().parse::<PaymentStatus>().unwrap(), status);
        }
        assert!("late".parse::<PaymentStatus>().is_err());
        assert!("Paid".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Overdue).unwrap(),
            "\"overdue\""
        );
    }
}
