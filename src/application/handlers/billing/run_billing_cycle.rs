//! RunBillingCycleHandler - The billing-cycle state machine.
//!
//! | Rule                      | Selects  | Status change      | Notice          |
//! |---------------------------|----------|--------------------|-----------------|
//! | `reminder_first`          | warning  | none               | early reminder  |
//! | `reminder_final`          | warning  | none               | final reminder  |
//! | `cycle_rollover` dry run  | overdue  | none               | overdue notice  |
//! | `cycle_rollover` live     | warning  | warning -> overdue | overdue notice  |
//! | `cycle_rollover` live     | paid     | paid -> warning    | none            |
//!
//! Live rollover runs the overdue step (update, then notify) before it reads
//! the paid members for the reset step. Do not reorder.
//!
//! A member selected as `warning` who pays before the guarded update runs is
//! left alone by the update but still receives the overdue notice computed
//! from the earlier read. That race is accepted.

use std::sync::Arc;

use chrono::Datelike;
use futures::future::join_all;

use crate::domain::billing::{ActionSummary, BillingCalendar, BillingRule, Member, PaymentStatus};
use crate::domain::foundation::{DomainError, StateMachine};
use crate::domain::notification::{NotificationKind, ReminderMessages};
use crate::ports::{Clock, MemberStatusStore, SubscriptionStore};

use crate::application::handlers::notification::NotificationDispatcher;

/// Command to run one billing cycle step.
#[derive(Debug, Clone, Default)]
pub struct RunBillingCycleCommand {
    /// Rule name forcing a rule regardless of the date. Unknown names fall
    /// back to the calendar.
    pub requested_rule: Option<String>,
    /// Send notifications but never mutate stored state.
    pub dry_run: bool,
}

/// Handler for scheduled billing runs.
///
/// Never fails: store and delivery errors are logged and degrade the
/// affected step to zero results.
pub struct RunBillingCycleHandler {
    members: Arc<dyn MemberStatusStore>,
    subscriptions: Arc<dyn SubscriptionStore>,
    dispatcher: Arc<NotificationDispatcher>,
    messages: ReminderMessages,
    calendar: BillingCalendar,
    clock: Arc<dyn Clock>,
}

impl RunBillingCycleHandler {
    pub fn new(
        members: Arc<dyn MemberStatusStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        dispatcher: Arc<NotificationDispatcher>,
        messages: ReminderMessages,
        calendar: BillingCalendar,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            members,
            subscriptions,
            dispatcher,
            messages,
            calendar,
            clock,
        }
    }

    pub async fn handle(&self, cmd: RunBillingCycleCommand) -> ActionSummary {
        let today = self.clock.today();
        let rule = BillingRule::resolve(cmd.requested_rule.as_deref(), &self.calendar, today);
        let dry_run = cmd.dry_run;

        tracing::info!(
            rule = rule.map(|r| r.as_str()),
            requested = cmd.requested_rule.is_some(),
            dry_run,
            %today,
            "Billing run started"
        );
        self.log_subscription_total().await;

        let mut summary = ActionSummary::new(rule, dry_run);
        match rule {
            Some(BillingRule::ReminderFirst) => {
                self.send_reminders(NotificationKind::EarlyReminder, "reminder", dry_run, &mut summary)
                    .await
            }
            Some(BillingRule::ReminderFinal) => {
                self.send_reminders(
                    NotificationKind::FinalReminder,
                    "final reminder",
                    dry_run,
                    &mut summary,
                )
                .await
            }
            Some(BillingRule::CycleRollover) if dry_run => {
                self.preview_rollover(&mut summary).await
            }
            Some(BillingRule::CycleRollover) => self.rollover(&mut summary).await,
            None => summary.record(format!(
                "No scheduled action for this day (day {})",
                today.day()
            )),
        }

        self.log_orphaned_subscriptions().await;
        tracing::info!(actions = ?summary.actions, "Billing run finished");
        summary
    }

    async fn send_reminders(
        &self,
        kind: NotificationKind,
        label: &str,
        dry_run: bool,
        summary: &mut ActionSummary,
    ) {
        let unpaid = self.select(PaymentStatus::Warning).await;
        if unpaid.is_empty() {
            summary.record("No members to notify");
            return;
        }

        self.notify_all(&unpaid, kind, dry_run).await;
        summary.record(format!("Sent {} to {} member(s)", label, unpaid.len()));
    }

    /// Demo rollover: re-notify members already overdue, change nothing.
    async fn preview_rollover(&self, summary: &mut ActionSummary) {
        let overdue = self.select(PaymentStatus::Overdue).await;
        if overdue.is_empty() {
            summary.record("No members to notify");
            return;
        }

        self.notify_all(&overdue, NotificationKind::OverdueNotice, true)
            .await;
        summary.record(format!(
            "Sent overdue notice to {} member(s) (demo, no status changes)",
            overdue.len()
        ));
    }

    async fn rollover(&self, summary: &mut ActionSummary) {
        // Step 1: warning -> overdue, then notify.
        let unpaid = self.select(PaymentStatus::Warning).await;
        if unpaid.is_empty() {
            summary.record("No members to mark overdue");
        } else {
            match self
                .transition(PaymentStatus::Warning, PaymentStatus::Overdue)
                .await
            {
                Ok(affected) => {
                    summary.record(format!("Marked {} member(s) as overdue", affected))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to mark members as overdue");
                    summary.record("Failed to mark members as overdue");
                }
            }

            self.notify_all(&unpaid, NotificationKind::OverdueNotice, false)
                .await;
            summary.record(format!("Sent overdue notice to {} member(s)", unpaid.len()));
        }

        // Step 2: paid -> warning for the new cycle.
        let paid = self.select(PaymentStatus::Paid).await;
        if paid.is_empty() {
            return;
        }

        match self
            .transition(PaymentStatus::Paid, PaymentStatus::Warning)
            .await
        {
            Ok(affected) => summary.record(format!(
                "Reset {} paid member(s) to warning",
                affected
            )),
            Err(e) => {
                tracing::error!(error = %e, "Failed to reset paid members to warning");
                summary.record("Failed to reset paid members to warning");
            }
        }
    }

    /// Guarded bulk update, validated against the status state machine.
    async fn transition(&self, from: PaymentStatus, to: PaymentStatus) -> Result<u64, DomainError> {
        from.transition_to(to)?;
        let affected = self.members.bulk_update_status(from, to).await?;
        tracing::info!(%from, %to, affected, "Bulk status update applied");
        Ok(affected)
    }

    async fn select(&self, status: PaymentStatus) -> Vec<Member> {
        match self.members.select_by_status(status).await {
            Ok(members) => {
                tracing::info!(%status, count = members.len(), "Selected members");
                members
            }
            Err(e) => {
                tracing::error!(%status, error = %e, "Failed to select members");
                Vec::new()
            }
        }
    }

    /// One concurrent delivery batch per member; waits for all of them.
    async fn notify_all(
        &self,
        members: &[Member],
        kind: NotificationKind,
        dry_run: bool,
    ) {
        let reports = join_all(members.iter().map(|member| {
            let payload = self.messages.payload(kind, member);
            async move {
                tracing::debug!(member_id = %member.id, name = %member.full_name, ?kind, "Notifying member");
                self.dispatcher.deliver(&member.id, &payload, dry_run).await
            }
        }))
        .await;

        let sent: usize = reports.iter().map(|r| r.sent).sum();
        let failed: usize = reports.iter().map(|r| r.failed).sum();
        let unreachable = reports.iter().filter(|r| r.had_no_targets).count();
        tracing::info!(
            ?kind,
            members = members.len(),
            sent,
            failed,
            unreachable,
            "Notification batch settled"
        );
    }

    async fn log_subscription_total(&self) {
        match self.subscriptions.count_all().await {
            Ok(total) => tracing::info!(total, "Stored push subscriptions"),
            Err(e) => tracing::warn!(error = %e, "Failed to count push subscriptions"),
        }
    }

    async fn log_orphaned_subscriptions(&self) {
        match self.subscriptions.count_orphaned().await {
            Ok(0) => tracing::debug!("All push subscriptions belong to a member"),
            Ok(orphaned) => tracing::warn!(orphaned, "Push subscriptions reference missing members"),
            Err(e) => tracing::warn!(error = %e, "Orphaned subscription check failed"),
        }
    }
}
