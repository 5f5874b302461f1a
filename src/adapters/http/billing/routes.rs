//! Axum router configuration for billing endpoints.

use axum::{middleware, routing::post, Router};

use crate::adapters::http::middleware::{cron_auth_middleware, CronSecret};

use super::handlers::{run_billing_cycle, BillingAppState};

/// Create the billing router.
///
/// # Routes
///
/// - `POST /api/cron/billing` - Scheduled trigger, bearer secret required
pub fn billing_router(secret: CronSecret) -> Router<BillingAppState> {
    Router::new()
        .route("/api/cron/billing", post(run_billing_cycle))
        .route_layer(middleware::from_fn_with_state(secret, cron_auth_middleware))
}
