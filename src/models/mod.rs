// src/models/mod.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ───────────────────────────────────────
// Input: one survey respondent
// ───────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Respondent {
    pub platform: Option<String>,
    pub happiness: Option<f64>,   // 1..10
    pub screen_time: Option<f64>, // hours/day
    pub stress: Option<f64>,      // 1..10
    pub sleep: Option<f64>,       // 1..10
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub exercise: Option<f64>,    // sessions/week
}

// ───────────────────────────────────────
// Output rows, one struct per view
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRow {
    pub name: String,
    pub happiness: Option<f64>,
    pub users: u64,
    pub screen_time: Option<f64>,
    pub stress: Option<f64>,
    pub sleep: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenTimeRow {
    pub category: String,
    pub happiness: Option<f64>,
    pub users: u64,
    pub sleep: Option<f64>,
    pub stress: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepRow {
    pub category: String,
    pub happiness: Option<f64>,
    pub users: u64,
    pub screen_time: Option<f64>,
    pub stress: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupRow {
    pub group: String,
    pub happiness: Option<f64>,
    pub users: u64,
    pub screen_time: Option<f64>,
    pub stress: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderRow {
    pub gender: String,
    pub happiness: Option<f64>,
    pub users: u64,
    pub exercise: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRow {
    pub category: String,
    pub happiness: Option<f64>,
    pub users: u64,
    pub stress: Option<f64>,
}

// ───────────────────────────────────────
// Combined payloads for endpoints
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub platform_data: Vec<PlatformRow>,
    pub screen_time_impact: Vec<ScreenTimeRow>,
    pub sleep_impact: Vec<SleepRow>,
    pub age_group_data: Vec<AgeGroupRow>,
    pub gender_data: Vec<GenderRow>,
    pub exercise_impact: Vec<ExerciseRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformScore {
    pub name: String,
    pub happiness: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketScore {
    pub category: String,
    pub happiness: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub respondents: usize,
    pub average_happiness: Option<f64>,
    pub best_platform: Option<PlatformScore>,
    pub worst_platform: Option<PlatformScore>,
    pub optimal_screen_time: Option<BucketScore>,
    pub screen_time_gap_pct: Option<f64>,
    pub sleep_gap_pct: Option<f64>,
    pub generated_at: DateTime<Utc>,
}
