//! Shared-secret authentication for the scheduled trigger.
//!
//! The scheduler calls in with `Authorization: Bearer <secret>`. Anything
//! other than an exact match is rejected with a plain-text 401 before the
//! handler runs, so no store is ever touched by an unauthorized caller.
//!
//! ```ignore
//! let secret = CronSecret::new(config.billing.cron_secret.clone());
//! let app = Router::new()
//!     .route("/api/cron/billing", post(run_billing_cycle))
//!     .layer(middleware::from_fn_with_state(secret, cron_auth_middleware));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

/// Expected bearer secret, shared across requests.
#[derive(Clone)]
pub struct CronSecret(Arc<SecretString>);

impl CronSecret {
    pub fn new(secret: SecretString) -> Self {
        Self(Arc::new(secret))
    }

    /// Constant-time comparison against a presented token.
    pub fn matches(&self, presented: &str) -> bool {
        let expected = self.0.expose_secret().as_bytes();
        expected.ct_eq(presented.as_bytes()).into()
    }
}

/// Rejects requests whose bearer token does not match the cron secret.
pub async fn cron_auth_middleware(
    State(secret): State<CronSecret>,
    request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) if secret.matches(token) => next.run(request).await,
        _ => {
            tracing::error!(path = %request.uri().path(), "Unauthorized cron request");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}
