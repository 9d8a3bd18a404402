// src/aggregate/summary.rs

//! Headline figures for the overview cards, derived from the six views.
//!
//! Percentages compare the rounded bucket means, i.e. the same numbers the
//! charts show.

use chrono::{DateTime, Utc};

use super::buckets::{ScreenTimeBucket, SleepBucket, SleepFairUpper};
use super::{round2, round_dp};
use crate::models::{
    BucketScore, DashboardData, DashboardSummary, PlatformRow, PlatformScore, ScreenTimeRow,
};

/// Relative gap of `a` over `b`, in percent with one decimal.
fn gap_pct(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) if b > 0.0 => Some(round_dp((a - b) / b * 100.0, 1)),
        _ => None,
    }
}

pub fn summarize(
    data: &DashboardData,
    respondents: usize,
    sleep_fair_upper: SleepFairUpper,
    generated_at: DateTime<Utc>,
) -> DashboardSummary {
    let platform_means: Vec<f64> = data.platform_data.iter().filter_map(|p| p.happiness).collect();
    let average_happiness = (!platform_means.is_empty())
        .then(|| round2(platform_means.iter().sum::<f64>() / platform_means.len() as f64));

    let to_score = |p: &PlatformRow| PlatformScore {
        name: p.name.clone(),
        happiness: p.happiness,
    };

    let optimal_screen_time = data
        .screen_time_impact
        .iter()
        .filter(|r| r.happiness.is_some())
        .fold(None::<&ScreenTimeRow>, |best, r| match best {
            Some(b) if b.happiness >= r.happiness => Some(b),
            _ => Some(r),
        })
        .map(|r| BucketScore { category: r.category.clone(), happiness: r.happiness });

    let screen = |bucket: ScreenTimeBucket| {
        data.screen_time_impact
            .iter()
            .find(|r| r.category == bucket.label())
            .and_then(|r| r.happiness)
    };
    let sleep = |bucket: SleepBucket| {
        data.sleep_impact
            .iter()
            .find(|r| r.category == bucket.label(sleep_fair_upper))
            .and_then(|r| r.happiness)
    };

    DashboardSummary {
        respondents,
        average_happiness,
        best_platform: data.platform_data.first().map(to_score),
        worst_platform: data.platform_data.last().map(to_score),
        optimal_screen_time,
        screen_time_gap_pct: gap_pct(screen(ScreenTimeBucket::Low), screen(ScreenTimeBucket::High)),
        sleep_gap_pct: gap_pct(sleep(SleepBucket::Good), sleep(SleepBucket::Poor)),
        generated_at,
    }
}
