// src/source/mod.rs

//! Where respondent rows come from.
//!
//! Handlers only see `Arc<dyn RespondentSource>`; the Postgres-backed
//! implementation lives in `crate::db`.

use async_trait::async_trait;

use crate::error::DataResult;
use crate::models::Respondent;

#[async_trait]
pub trait RespondentSource: Send + Sync {
    /// Every respondent row, read fresh on each call.
    async fn fetch_respondents(&self) -> DataResult<Vec<Respondent>>;
}
