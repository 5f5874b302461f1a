//! PostgreSQL implementation of MemberStatusStore.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{Member, PaymentStatus};
use crate::domain::foundation::{DomainError, ErrorCode, MemberId};
use crate::ports::MemberStatusStore;

/// PostgreSQL implementation of the MemberStatusStore port.
pub struct PostgresMemberStatusStore {
    pool: PgPool,
}

impl PostgresMemberStatusStore {
    /// Creates a new store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a member.
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    full_name: String,
    routing_token: String,
    status: String,
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let status: PaymentStatus = row.status.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid status value: {}", row.status),
            )
        })?;

        Ok(Member {
            id: MemberId::from_uuid(row.id),
            full_name: row.full_name,
            routing_token: row.routing_token,
            status,
        })
    }
}

#[async_trait]
impl MemberStatusStore for PostgresMemberStatusStore {
    async fn select_by_status(&self, status: PaymentStatus) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT id, full_name, routing_token, status
            FROM members
            WHERE status = $1
            ORDER BY full_name ASC
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to select members: {}", e)))?;

        rows.into_iter().map(Member::try_from).collect()
    }

    async fn bulk_update_status(
        &self,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members SET
                status = $2,
                updated_at = NOW()
            WHERE status = $1
            "#,
        )
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!(
                "Failed to update members from {} to {}: {}",
                from, to, e
            ))
        })?;

        Ok(result.rows_affected())
    }
}
