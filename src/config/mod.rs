// src/config/mod.rs

//! Environment-driven configuration.
//!
//! Everything is read once in `main` after `.env` has been loaded. The
//! survey table layout lives in [`ColumnMap`] so that deployments with a
//! differently named table or columns only need different variables.

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::aggregate::buckets::SleepFairUpper;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("invalid SQL identifier for {key}: {value:?}")]
    Identifier { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db: DbConfig,
    pub columns: ColumnMap,
    pub sleep_fair_upper: SleepFairUpper,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
    /// Full URL; when present the discrete parts below are ignored.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub ssl: bool,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

/// Logical survey field → physical column, plus the table holding them.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub schema: Option<String>,
    pub table: String,
    pub platform: String,
    pub happiness: String,
    pub screen_time: String,
    pub stress: String,
    pub sleep: String,
    pub age: String,
    pub gender: String,
    pub exercise: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            schema: None,
            table: "users".into(),
            platform: "primary_platform".into(),
            happiness: "happiness_score".into(),
            screen_time: "screen_time_hours".into(),
            stress: "stress_level".into(),
            sleep: "sleep_quality".into(),
            age: "age".into(),
            gender: "gender".into(),
            exercise: "exercise_frequency".into(),
        }
    }
}

impl ColumnMap {
    /// `"schema"."table"` or `"table"`.
    pub fn qualified_table(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", quote_ident(schema), quote_ident(&self.table)),
            None => quote_ident(&self.table),
        }
    }
}

pub fn quote_ident(ident: &str) -> String {
    format!("\"{ident}\"")
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; tests feed a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = parse_or(&get, "PORT", 3001u16)?;

        let db = DbConfig {
            url: get("DATABASE_URL"),
            host: get("DB_HOST").unwrap_or_else(|| "localhost".into()),
            port: parse_or(&get, "DB_PORT", 5432u16)?,
            database: get("DB_NAME").unwrap_or_else(|| "postgres".into()),
            user: get("DB_USER").unwrap_or_else(|| "postgres".into()),
            password: get("DB_PASSWORD").unwrap_or_default(),
            ssl: get("DB_SSL").map(|v| v == "true").unwrap_or(false),
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 5u32)?,
            acquire_timeout: Duration::from_secs(parse_or(&get, "DB_ACQUIRE_TIMEOUT_SECS", 30u64)?),
        };

        let defaults = ColumnMap::default();
        let ident = |key: &'static str, fallback: String| -> Result<String, ConfigError> {
            let value = get(key).unwrap_or(fallback);
            if is_identifier(&value) {
                Ok(value)
            } else {
                Err(ConfigError::Identifier { key, value })
            }
        };

        let schema = match get("SURVEY_SCHEMA") {
            Some(value) if is_identifier(&value) => Some(value),
            Some(value) => return Err(ConfigError::Identifier { key: "SURVEY_SCHEMA", value }),
            None => None,
        };

        let columns = ColumnMap {
            schema,
            table: ident("SURVEY_TABLE", defaults.table)?,
            platform: ident("SURVEY_COL_PLATFORM", defaults.platform)?,
            happiness: ident("SURVEY_COL_HAPPINESS", defaults.happiness)?,
            screen_time: ident("SURVEY_COL_SCREEN_TIME", defaults.screen_time)?,
            stress: ident("SURVEY_COL_STRESS", defaults.stress)?,
            sleep: ident("SURVEY_COL_SLEEP", defaults.sleep)?,
            age: ident("SURVEY_COL_AGE", defaults.age)?,
            gender: ident("SURVEY_COL_GENDER", defaults.gender)?,
            exercise: ident("SURVEY_COL_EXERCISE", defaults.exercise)?,
        };

        let sleep_fair_upper = match get("SLEEP_FAIR_UPPER").as_deref() {
            None | Some("7") => SleepFairUpper::Seven,
            Some("6") => SleepFairUpper::Six,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "SLEEP_FAIR_UPPER",
                    value: other.to_string(),
                    reason: "expected 6 or 7",
                })
            }
        };

        Ok(Self { port, db, columns, sleep_fair_upper })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
            reason: "not a number",
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(map: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |key: &str| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn defaults_match_original_schema() {
        let cfg = Config::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.port, 3001);
        assert_eq!(cfg.db.port, 5432);
        assert!(!cfg.db.ssl);
        assert_eq!(cfg.columns, ColumnMap::default());
        assert_eq!(cfg.columns.qualified_table(), "\"users\"");
        assert_eq!(cfg.sleep_fair_upper, SleepFairUpper::Seven);
    }

    #[test]
    fn alternate_schema_variant_is_pure_configuration() {
        let map = HashMap::from([
            ("SURVEY_SCHEMA", "survey"),
            ("SURVEY_TABLE", "Responses"),
            ("SURVEY_COL_PLATFORM", "Platform"),
            ("SLEEP_FAIR_UPPER", "6"),
            ("DB_SSL", "true"),
        ]);
        let cfg = Config::from_lookup(lookup_from(map)).unwrap();
        assert_eq!(cfg.columns.qualified_table(), "\"survey\".\"Responses\"");
        assert_eq!(cfg.columns.platform, "Platform");
        assert_eq!(cfg.columns.happiness, "happiness_score");
        assert_eq!(cfg.sleep_fair_upper, SleepFairUpper::Six);
        assert!(cfg.db.ssl);
    }

    #[test]
    fn rejects_injection_in_identifiers() {
        let map = HashMap::from([("SURVEY_TABLE", "users; DROP TABLE users")]);
        let err = Config::from_lookup(lookup_from(map)).unwrap_err();
        assert!(matches!(err, ConfigError::Identifier { key: "SURVEY_TABLE", .. }));
    }

    #[test]
    fn rejects_bad_numbers_and_sleep_bound() {
        let map = HashMap::from([("PORT", "http")]);
        assert!(matches!(
            Config::from_lookup(lookup_from(map)),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));

        let map = HashMap::from([("SLEEP_FAIR_UPPER", "8")]);
        assert!(matches!(
            Config::from_lookup(lookup_from(map)),
            Err(ConfigError::Invalid { key: "SLEEP_FAIR_UPPER", .. })
        ));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let map = HashMap::from([("DB_HOST", "  "), ("DATABASE_URL", "")]);
        let cfg = Config::from_lookup(lookup_from(map)).unwrap();
        assert_eq!(cfg.db.host, "localhost");
        assert_eq!(cfg.db.url, None);
    }
}
