// src/main.rs

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod config;
mod db;
mod error;
mod models;
mod routes;
mod source;

use aggregate::buckets::SleepFairUpper;
use config::Config;
use db::PgRespondentSource;
use source::RespondentSource;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RespondentSource>,
    pub sleep_fair_upper: SleepFairUpper,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("social_wellbeing_api=info,tower_http=info")),
        )
        .init();

    let cfg = Config::from_env().context("invalid configuration")?;
    tracing::info!(
        table = %cfg.columns.qualified_table(),
        sleep_fair_upper = cfg.sleep_fair_upper.value(),
        "configuration loaded"
    );

    // DB pool, owned by the respondent source for the life of the process
    let pool = db::connect(&cfg.db).await?;
    let pg_source = Arc::new(PgRespondentSource::new(pool, &cfg.columns));

    let state = AppState {
        source: pg_source.clone(),
        sleep_fair_upper: cfg.sleep_fair_upper,
    };
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pg_source.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
