//! PostgreSQL implementation of SubscriptionStore.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, MemberId, SubscriptionId};
use crate::domain::notification::{PushKeys, PushSubscription};
use crate::ports::SubscriptionStore;

/// PostgreSQL implementation of the SubscriptionStore port.
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    /// Creates a new store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a push subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    member_id: Uuid,
    endpoint: String,
    p256dh: String,
    auth: String,
}

impl From<SubscriptionRow> for PushSubscription {
    fn from(row: SubscriptionRow) -> Self {
        PushSubscription {
            id: SubscriptionId::from_uuid(row.id),
            member_id: MemberId::from_uuid(row.member_id),
            endpoint: row.endpoint,
            keys: PushKeys {
                p256dh: row.p256dh,
                auth: row.auth,
            },
        }
    }
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn select_by_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<PushSubscription>, DomainError> {
        // Oldest first so the newest row wins endpoint dedup.
        let rows: Vec<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, endpoint, p256dh, auth
            FROM push_subscriptions
            WHERE member_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(member_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to load push subscriptions: {}", e))
        })?;

        Ok(rows.into_iter().map(PushSubscription::from).collect())
    }

    async fn delete_by_ids(&self, ids: &[SubscriptionId]) -> Result<(), DomainError> {
        if ids.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        sqlx::query("DELETE FROM push_subscriptions WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to delete push subscriptions: {}", e))
            })?;

        Ok(())
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM push_subscriptions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to count push subscriptions: {}", e))
            })?;

        Ok(count.max(0) as u64)
    }

    async fn count_orphaned(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM push_subscriptions s
            WHERE NOT EXISTS (SELECT 1 FROM members m WHERE m.id = s.member_id)
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to count orphaned subscriptions: {}", e))
        })?;

        Ok(count.max(0) as u64)
    }
}
