// src/routes/dashboard.rs

use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{
    aggregate::{build_dashboard, summary::summarize},
    error::DataResult,
    models::{DashboardData, DashboardSummary},
    AppState,
};

/// GET /api/dashboard-data
pub async fn get_dashboard_data(State(state): State<AppState>) -> DataResult<Json<DashboardData>> {
    let started = Instant::now();
    let respondents = state.source.fetch_respondents().await?;
    let data = build_dashboard(&respondents, state.sleep_fair_upper);

    tracing::info!(
        respondents = respondents.len(),
        platforms = data.platform_data.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "dashboard data computed"
    );
    Ok(Json(data))
}

/// GET /api/dashboard-summary
pub async fn get_dashboard_summary(
    State(state): State<AppState>,
) -> DataResult<Json<DashboardSummary>> {
    let respondents = state.source.fetch_respondents().await?;
    let data = build_dashboard(&respondents, state.sleep_fair_upper);
    let summary = summarize(&data, respondents.len(), state.sleep_fair_upper, Utc::now());
    Ok(Json(summary))
}

/// OPTIONS on any API route: empty 200. Proper CORS pre-flights are answered
/// by the CORS layer before they get here.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
