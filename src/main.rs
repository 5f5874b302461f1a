//! Club Billing server binary.
//!
//! Serves `POST /api/cron/billing` for the external scheduler and
//! `GET /health` for the platform's liveness probe.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use club_billing::adapters::http::{app_router, BillingAppState, CronSecret};
use club_billing::adapters::{
    PostgresMemberStatusStore, PostgresSubscriptionStore, SystemClock, WebPushConfig,
    WebPushTransport,
};
use club_billing::application::{NotificationDispatcher, RunBillingCycleHandler};
use club_billing::config::AppConfig;
use club_billing::domain::notification::ReminderMessages;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let members = Arc::new(PostgresMemberStatusStore::new(pool.clone()));
    let subscriptions = Arc::new(PostgresSubscriptionStore::new(pool));

    let transport = Arc::new(WebPushTransport::new(
        WebPushConfig::new(
            config.push.vapid_private_key.expose_secret().clone(),
            config.push.vapid_subject.clone(),
        )
        .with_ttl(config.push.ttl()),
    ));

    let dispatcher = Arc::new(
        NotificationDispatcher::new(subscriptions.clone(), transport)
            .with_send_timeout(config.push.send_timeout()),
    );

    let handler = Arc::new(RunBillingCycleHandler::new(
        members,
        subscriptions,
        dispatcher,
        ReminderMessages::new(config.billing.club_name.clone(), config.billing.app_url.clone()),
        config.billing.calendar(),
        Arc::new(SystemClock),
    ));

    let app = app_router(
        BillingAppState::new(handler),
        CronSecret::new(config.billing.cron_secret.clone()),
    )
    .layer(TimeoutLayer::new(config.server.request_timeout()))
    .layer(TraceLayer::new_for_http());

    let addr = config.server.bind_addr;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_filter));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
