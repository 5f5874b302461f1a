//! HTTP handlers for the billing trigger.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};

use crate::application::handlers::billing::{RunBillingCycleCommand, RunBillingCycleHandler};

use super::dto::{RunBillingRequest, RunBillingResponse};

/// Shared state for billing endpoints.
#[derive(Clone)]
pub struct BillingAppState {
    pub billing_handler: Arc<RunBillingCycleHandler>,
}

impl BillingAppState {
    pub fn new(billing_handler: Arc<RunBillingCycleHandler>) -> Self {
        Self { billing_handler }
    }
}

/// POST /api/cron/billing - Run the billing cycle.
///
/// Always 200 once authorized, including runs that did nothing.
pub async fn run_billing_cycle(
    State(state): State<BillingAppState>,
    body: Bytes,
) -> Json<RunBillingResponse> {
    let request = RunBillingRequest::from_body(&body);
    let cmd = RunBillingCycleCommand {
        requested_rule: request.requested_rule(),
        dry_run: request.dry_run(),
    };

    let summary = state.billing_handler.handle(cmd).await;
    Json(RunBillingResponse::from(summary))
}
