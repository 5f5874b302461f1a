//! NotificationDispatcher - Fans a payload out to all devices of a member.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::domain::foundation::{MemberId, SubscriptionId};
use crate::domain::notification::{
    dedupe_by_endpoint, DeliveryOutcome, DeliveryReport, NotificationPayload, PushSubscription,
};
use crate::ports::{PushError, PushTransport, SubscriptionStore};

/// Default upper bound for a single send.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers notifications to every registered device of a member.
///
/// Sends run concurrently and are all awaited; one failing endpoint never
/// aborts its siblings. Store failures degrade to "no targets" or a skipped
/// cleanup and are only logged.
pub struct NotificationDispatcher {
    subscriptions: Arc<dyn SubscriptionStore>,
    transport: Arc<dyn PushTransport>,
    send_timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        transport: Arc<dyn PushTransport>,
    ) -> Self {
        Self {
            subscriptions,
            transport,
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    pub fn with_send_timeout(mut self, send_timeout: Duration) -> Self {
        self.send_timeout = send_timeout;
        self
    }

    /// Sends `payload` once per unique endpoint registered for `member_id`.
    ///
    /// With `dry_run` set, endpoints reported gone are left in the store.
    pub async fn deliver(
        &self,
        member_id: &MemberId,
        payload: &NotificationPayload,
        dry_run: bool,
    ) -> DeliveryReport {
        let rows = match self.subscriptions.select_by_member(member_id).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(%member_id, error = %e, "Failed to load push subscriptions");
                return DeliveryReport::no_targets();
            }
        };

        if rows.is_empty() {
            tracing::warn!(%member_id, "No push subscriptions for member");
            return DeliveryReport::no_targets();
        }

        let row_count = rows.len();
        let targets = dedupe_by_endpoint(rows);
        tracing::debug!(
            %member_id,
            rows = row_count,
            endpoints = targets.len(),
            "Resolved push targets"
        );

        let message = match payload.to_bytes() {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(%member_id, error = %e, "Failed to serialize notification payload");
                return DeliveryReport {
                    failed: targets.len(),
                    ..DeliveryReport::default()
                };
            }
        };

        let outcomes = join_all(
            targets
                .iter()
                .map(|target| self.send_one(member_id, target, &message)),
        )
        .await;

        let expired: Vec<SubscriptionId> = targets
            .iter()
            .zip(&outcomes)
            .filter(|(_, outcome)| **outcome == DeliveryOutcome::Gone)
            .map(|(target, _)| target.id)
            .collect();

        self.remove_expired(member_id, &expired, dry_run).await;

        let report = DeliveryReport::from_outcomes(&outcomes);
        tracing::info!(
            %member_id,
            sent = report.sent,
            failed = report.failed,
            expired = report.expired,
            "Push delivery finished"
        );
        report
    }

    async fn send_one(
        &self,
        member_id: &MemberId,
        target: &PushSubscription,
        message: &[u8],
    ) -> DeliveryOutcome {
        let send = self.transport.send(&target.endpoint, &target.keys, message);
        let result = match tokio::time::timeout(self.send_timeout, send).await {
            Ok(result) => result,
            Err(_) => Err(PushError::Timeout),
        };

        match result {
            Ok(()) => {
                tracing::debug!(%member_id, endpoint = target.endpoint_preview(), "Push sent");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                tracing::warn!(
                    %member_id,
                    endpoint = target.endpoint_preview(),
                    status_code = ?e.status_code(),
                    error = %e,
                    "Push send failed"
                );
                if e.is_gone() {
                    DeliveryOutcome::Gone
                } else {
                    DeliveryOutcome::Failed
                }
            }
        }
    }

    async fn remove_expired(&self, member_id: &MemberId, expired: &[SubscriptionId], dry_run: bool) {
        if expired.is_empty() {
            return;
        }

        if dry_run {
            tracing::info!(
                %member_id,
                count = expired.len(),
                "Dry run: keeping expired push subscriptions"
            );
            return;
        }

        match self.subscriptions.delete_by_ids(expired).await {
            Ok(()) => tracing::info!(
                %member_id,
                count = expired.len(),
                "Removed expired push subscriptions"
            ),
            Err(e) => tracing::error!(
                %member_id,
                count = expired.len(),
                error = %e,
                "Failed to remove expired push subscriptions"
            ),
        }
    }
}
