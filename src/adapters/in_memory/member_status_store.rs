//! In-memory member status store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::billing::{Member, PaymentStatus};
use crate::domain::foundation::{DomainError, MemberId};
use crate::ports::MemberStatusStore;

/// Member status store held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberStatusStore {
    members: Arc<RwLock<Vec<Member>>>,
}

impl InMemoryMemberStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with members.
    pub fn with_members(members: Vec<Member>) -> Self {
        Self {
            members: Arc::new(RwLock::new(members)),
        }
    }

    pub async fn insert(&self, member: Member) {
        self.members.write().await.push(member);
    }

    pub async fn status_of(&self, id: &MemberId) -> Option<PaymentStatus> {
        self.members
            .read()
            .await
            .iter()
            .find(|m| &m.id == id)
            .map(|m| m.status)
    }

    /// Unconditional single-member write, standing in for manual payment marking.
    pub async fn set_status(&self, id: &MemberId, status: PaymentStatus) -> bool {
        let mut members = self.members.write().await;
        match members.iter_mut().find(|m| &m.id == id) {
            Some(member) => {
                member.status = status;
                true
            }
            None => false,
        }
    }

    pub async fn contains(&self, id: &MemberId) -> bool {
        self.members.read().await.iter().any(|m| &m.id == id)
    }
}

#[async_trait]
impl MemberStatusStore for InMemoryMemberStatusStore {
    async fn select_by_status(&self, status: PaymentStatus) -> Result<Vec<Member>, DomainError> {
        Ok(self
            .members
            .read()
            .await
            .iter()
            .filter(|m| m.status == status)
            .cloned()
            .collect())
    }

    async fn bulk_update_status(
        &self,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<u64, DomainError> {
        let mut members = self.members.write().await;
        let mut affected = 0;
        for member in members.iter_mut().filter(|m| m.status == from) {
            member.status = to;
            affected += 1;
        }
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(status: PaymentStatus) -> Member {
        Member::new(MemberId::new(), "Test Member", "tag", status)
    }

    #[tokio::test]
    async fn bulk_update_only_touches_rows_in_from_status() {
        let store = InMemoryMemberStatusStore::with_members(vec![
            member(PaymentStatus::Warning),
            member(PaymentStatus::Paid),
            member(PaymentStatus::Warning),
        ]);

        let affected = store
            .bulk_update_status(PaymentStatus::Warning, PaymentStatus::Overdue)
            .await
            .unwrap();

        assert_eq!(affected, 2);
        let overdue = store.select_by_status(PaymentStatus::Overdue).await.unwrap();
        let paid = store.select_by_status(PaymentStatus::Paid).await.unwrap();
        assert_eq!(overdue.len(), 2);
        assert_eq!(paid.len(), 1);
    }

    #[tokio::test]
    async fn member_paid_after_selection_is_excluded_by_guard() {
        let late_payer = member(PaymentStatus::Warning);
        let late_payer_id = late_payer.id;
        let store = InMemoryMemberStatusStore::with_members(vec![
            late_payer,
            member(PaymentStatus::Warning),
        ]);

        let selected = store.select_by_status(PaymentStatus::Warning).await.unwrap();
        assert_eq!(selected.len(), 2);

        store.set_status(&late_payer_id, PaymentStatus::Paid).await;
        let affected = store
            .bulk_update_status(PaymentStatus::Warning, PaymentStatus::Overdue)
            .await
            .unwrap();

        assert_eq!(affected, 1);
        assert_eq!(store.status_of(&late_payer_id).await, Some(PaymentStatus::Paid));
    }

    #[tokio::test]
    async fn set_status_reports_unknown_member() {
        let store = InMemoryMemberStatusStore::new();
        assert!(!store.set_status(&MemberId::new(), PaymentStatus::Paid).await);
    }
}
