//! Member read model used by the billing cycle.

use crate::domain::foundation::MemberId;

use super::PaymentStatus;

/// A club participant tracked for fee payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub full_name: String,
    /// Stable external identifier used to build deep links to the profile view.
    pub routing_token: String,
    pub status: PaymentStatus,
}

impl Member {
    pub fn new(
        id: MemberId,
        full_name: impl Into<String>,
        routing_token: impl Into<String>,
        status: PaymentStatus,
    ) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            routing_token: routing_token.into(),
            status,
        }
    }
}
