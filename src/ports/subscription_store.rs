//! Subscription store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId, SubscriptionId};
use crate::domain::notification::PushSubscription;

/// Store port for device push registrations.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// All rows for a member, oldest first. May contain duplicate endpoints.
    async fn select_by_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<PushSubscription>, DomainError>;

    /// Deletes the given rows in one batch. Unknown ids are ignored.
    async fn delete_by_ids(&self, ids: &[SubscriptionId]) -> Result<(), DomainError>;

    /// Total number of stored rows (diagnostics).
    async fn count_all(&self) -> Result<u64, DomainError>;

    /// Rows whose member no longer exists (diagnostics).
    async fn count_orphaned(&self) -> Result<u64, DomainError>;
}
