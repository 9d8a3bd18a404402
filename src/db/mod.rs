// src/db/mod.rs

use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow, PgSslMode};
use sqlx::{PgPool, Row};

use crate::config::{quote_ident, ColumnMap, DbConfig};
use crate::error::DataResult;
use crate::models::Respondent;
use crate::source::RespondentSource;

pub fn connect_options(cfg: &DbConfig) -> anyhow::Result<PgConnectOptions> {
    if let Some(url) = &cfg.url {
        return PgConnectOptions::from_str(url).context("DATABASE_URL is not a valid Postgres URL");
    }

    let ssl_mode = if cfg.ssl { PgSslMode::Require } else { PgSslMode::Disable };
    Ok(PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .database(&cfg.database)
        .username(&cfg.user)
        .password(&cfg.password)
        .ssl_mode(ssl_mode))
}

pub async fn connect(cfg: &DbConfig) -> anyhow::Result<PgPool> {
    let options = connect_options(cfg)?;

    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(cfg.acquire_timeout)
        .connect_with(options)
        .await
        .context("failed to connect to Postgres")?;

    tracing::info!(max_connections = cfg.max_connections, "connected to PostgreSQL");
    Ok(pool)
}

/// One SELECT over the survey table with every logical field aliased to a
/// fixed name and cast to the type the reader expects.
pub fn select_respondents_sql(columns: &ColumnMap) -> String {
    format!(
        "SELECT {}::text AS platform, \
                {}::float8 AS happiness, \
                {}::float8 AS screen_time, \
                {}::float8 AS stress, \
                {}::float8 AS sleep, \
                {}::int8 AS age, \
                {}::text AS gender, \
                {}::float8 AS exercise \
         FROM {}",
        quote_ident(&columns.platform),
        quote_ident(&columns.happiness),
        quote_ident(&columns.screen_time),
        quote_ident(&columns.stress),
        quote_ident(&columns.sleep),
        quote_ident(&columns.age),
        quote_ident(&columns.gender),
        quote_ident(&columns.exercise),
        columns.qualified_table(),
    )
}

fn respondent_from_row(row: &PgRow) -> Result<Respondent, sqlx::Error> {
    Ok(Respondent {
        platform: row.try_get("platform")?,
        happiness: row.try_get("happiness")?,
        screen_time: row.try_get("screen_time")?,
        stress: row.try_get("stress")?,
        sleep: row.try_get("sleep")?,
        age: row.try_get("age")?,
        gender: row.try_get("gender")?,
        exercise: row.try_get("exercise")?,
    })
}

pub struct PgRespondentSource {
    pool: PgPool,
    select_sql: String,
}

impl PgRespondentSource {
    pub fn new(pool: PgPool, columns: &ColumnMap) -> Self {
        Self { pool, select_sql: select_respondents_sql(columns) }
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}

#[async_trait]
impl RespondentSource for PgRespondentSource {
    async fn fetch_respondents(&self) -> DataResult<Vec<Respondent>> {
        let started = Instant::now();
        // Returned to the pool when dropped, on every path out of here.
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(&self.select_sql).fetch_all(&mut *conn).await?;
        let respondents = rows
            .iter()
            .map(respondent_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            rows = respondents.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched respondents"
        );
        Ok(respondents)
    }
}
