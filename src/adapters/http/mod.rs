//! HTTP adapters - Axum entry points.

pub mod billing;
pub mod middleware;

use axum::{routing::get, Router};

pub use billing::{billing_router, BillingAppState};
pub use middleware::CronSecret;

/// Full application router: the billing trigger plus an open liveness probe.
pub fn app_router(state: BillingAppState, secret: CronSecret) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(billing_router(secret))
        .with_state(state)
}

/// GET /health - Liveness probe.
async fn health() -> &'static str {
    "ok"
}
