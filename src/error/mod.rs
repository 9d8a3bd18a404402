// src/error/mod.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// The only failure callers ever see: the respondent rows could not be read.
/// Connection, query and decode problems all collapse into it.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{0}")]
    DataUnavailable(String),
}

impl From<sqlx::Error> for DataError {
    fn from(e: sqlx::Error) -> Self {
        DataError::DataUnavailable(e.to_string())
    }
}

impl IntoResponse for DataError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "dashboard data unavailable");
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type DataResult<T> = Result<T, DataError>;
