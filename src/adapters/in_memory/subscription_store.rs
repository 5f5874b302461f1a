//! In-memory subscription store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, MemberId, SubscriptionId};
use crate::domain::notification::PushSubscription;
use crate::ports::SubscriptionStore;

use super::InMemoryMemberStatusStore;

/// Push registrations held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionStore {
    rows: Arc<RwLock<Vec<PushSubscription>>>,
    members: Option<InMemoryMemberStatusStore>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links the member store so orphaned rows can be detected.
    pub fn linked_to(mut self, members: InMemoryMemberStatusStore) -> Self {
        self.members = Some(members);
        self
    }

    pub async fn insert(&self, subscription: PushSubscription) {
        self.rows.write().await.push(subscription);
    }

    pub async fn ids(&self) -> Vec<SubscriptionId> {
        self.rows.read().await.iter().map(|row| row.id).collect()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn select_by_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<PushSubscription>, DomainError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| &row.member_id == member_id)
            .cloned()
            .collect())
    }

    async fn delete_by_ids(&self, ids: &[SubscriptionId]) -> Result<(), DomainError> {
        self.rows.write().await.retain(|row| !ids.contains(&row.id));
        Ok(())
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        Ok(self.rows.read().await.len() as u64)
    }

    async fn count_orphaned(&self) -> Result<u64, DomainError> {
        let Some(members) = &self.members else {
            return Ok(0);
        };

        let member_ids: Vec<MemberId> = self.rows.read().await.iter().map(|r| r.member_id).collect();
        let mut orphaned = 0;
        for member_id in member_ids {
            if !members.contains(&member_id).await {
                orphaned += 1;
            }
        }
        Ok(orphaned)
    }
}
