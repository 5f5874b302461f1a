//! Member status store port.
//!
//! The status column is the one piece of shared mutable state: manual payment
//! marking writes it concurrently with scheduled runs. Every write through
//! this port is therefore a guarded bulk update (`WHERE status = from`),
//! never an unconditional overwrite.

use async_trait::async_trait;

use crate::domain::billing::{Member, PaymentStatus};
use crate::domain::foundation::DomainError;

/// Store port for member payment status.
#[async_trait]
pub trait MemberStatusStore: Send + Sync {
    /// All members currently in `status`.
    async fn select_by_status(&self, status: PaymentStatus) -> Result<Vec<Member>, DomainError>;

    /// Moves every member still in `from` to `to` in one statement.
    ///
    /// Members whose status changed since they were read are excluded by the
    /// guard. Returns the number of rows affected.
    async fn bulk_update_status(
        &self,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<u64, DomainError>;
}
