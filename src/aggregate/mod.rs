// src/aggregate/mod.rs

//! The six dashboard views.
//!
//! Every view is a pure function of the full respondent slice. Rows are only
//! produced for buckets/categories that at least one respondent falls into,
//! means skip missing values the way SQL `AVG` does, and rounding to two
//! decimals happens once, when a row is emitted.

pub mod buckets;
pub mod summary;

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::models::{
    AgeGroupRow, DashboardData, ExerciseRow, GenderRow, PlatformRow, Respondent, ScreenTimeRow,
    SleepRow,
};
use buckets::{AgeBucket, ExerciseBucket, ScreenTimeBucket, SleepBucket, SleepFairUpper};

/// Rounds half away from zero to `dp` decimals.
///
/// The scaled value is first snapped to a millionth of a unit so that
/// binary noise (`2.675 * 100 == 267.49999…`) does not flip the result.
pub fn round_dp(x: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    let scaled = ((x * factor) * 1e6).round() / 1e6;
    scaled.round() / factor
}

pub fn round2(x: f64) -> f64 {
    round_dp(x, 2)
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    n: u64,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.n += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.n > 0).then(|| round2(self.sum / self.n as f64))
    }
}

#[derive(Debug, Default)]
struct Stats {
    users: u64,
    happiness: Mean,
    screen_time: Mean,
    stress: Mean,
    sleep: Mean,
    exercise: Mean,
}

impl Stats {
    fn add(&mut self, r: &Respondent) {
        self.users += 1;
        self.happiness.push(r.happiness);
        self.screen_time.push(r.screen_time);
        self.stress.push(r.stress);
        self.sleep.push(r.sleep);
        self.exercise.push(r.exercise);
    }
}

/// Groups by a bucket key; the key's `Ord` is the output order.
fn bucketed<K, F>(respondents: &[Respondent], key: F) -> Vec<(K, Stats)>
where
    K: Ord,
    F: Fn(&Respondent) -> Option<K>,
{
    let mut groups: BTreeMap<K, Stats> = BTreeMap::new();
    for r in respondents {
        if let Some(k) = key(r) {
            groups.entry(k).or_default().add(r);
        }
    }
    groups.into_iter().collect()
}

/// Groups by a free-form category, keeping first-appearance order.
fn categorized<F>(respondents: &[Respondent], key: F) -> Vec<(String, Stats)>
where
    F: Fn(&Respondent) -> Option<&str>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Stats)> = Vec::new();

    for r in respondents {
        let Some(k) = key(r) else { continue };
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push((k.to_string(), Stats::default()));
            groups.len() - 1
        });
        groups[slot].1.add(r);
    }
    groups
}

/// Descending by happiness; rows without a mean go last. Used with a stable
/// sort so ties keep their incoming order.
fn happiness_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn platform_view(respondents: &[Respondent]) -> Vec<PlatformRow> {
    let mut rows: Vec<PlatformRow> = categorized(respondents, |r| r.platform.as_deref())
        .into_iter()
        .map(|(name, s)| PlatformRow {
            name,
            happiness: s.happiness.value(),
            users: s.users,
            screen_time: s.screen_time.value(),
            stress: s.stress.value(),
            sleep: s.sleep.value(),
        })
        .collect();
    rows.sort_by(|a, b| happiness_desc(a.happiness, b.happiness));
    rows
}

pub fn screen_time_view(respondents: &[Respondent]) -> Vec<ScreenTimeRow> {
    bucketed(respondents, |r| r.screen_time.map(ScreenTimeBucket::classify))
        .into_iter()
        .map(|(bucket, s)| ScreenTimeRow {
            category: bucket.label().to_string(),
            happiness: s.happiness.value(),
            users: s.users,
            sleep: s.sleep.value(),
            stress: s.stress.value(),
        })
        .collect()
}

pub fn sleep_view(respondents: &[Respondent], upper: SleepFairUpper) -> Vec<SleepRow> {
    bucketed(respondents, |r| r.sleep.map(|q| SleepBucket::classify(q, upper)))
        .into_iter()
        .map(|(bucket, s)| SleepRow {
            category: bucket.label(upper).to_string(),
            happiness: s.happiness.value(),
            users: s.users,
            screen_time: s.screen_time.value(),
            stress: s.stress.value(),
        })
        .collect()
}

pub fn age_group_view(respondents: &[Respondent]) -> Vec<AgeGroupRow> {
    bucketed(respondents, |r| r.age.map(AgeBucket::classify))
        .into_iter()
        .map(|(bucket, s)| AgeGroupRow {
            group: bucket.label().to_string(),
            happiness: s.happiness.value(),
            users: s.users,
            screen_time: s.screen_time.value(),
            stress: s.stress.value(),
        })
        .collect()
}

pub fn gender_view(respondents: &[Respondent]) -> Vec<GenderRow> {
    let mut rows: Vec<GenderRow> = categorized(respondents, |r| r.gender.as_deref())
        .into_iter()
        .map(|(gender, s)| GenderRow {
            gender,
            happiness: s.happiness.value(),
            users: s.users,
            exercise: s.exercise.value(),
        })
        .collect();
    rows.sort_by(|a, b| happiness_desc(a.happiness, b.happiness));
    rows
}

pub fn exercise_view(respondents: &[Respondent]) -> Vec<ExerciseRow> {
    bucketed(respondents, |r| r.exercise.map(ExerciseBucket::classify))
        .into_iter()
        .map(|(bucket, s)| ExerciseRow {
            category: bucket.label().to_string(),
            happiness: s.happiness.value(),
            users: s.users,
            stress: s.stress.value(),
        })
        .collect()
}

/// All six views over one snapshot of respondents.
pub fn build_dashboard(respondents: &[Respondent], sleep_fair_upper: SleepFairUpper) -> DashboardData {
    DashboardData {
        platform_data: platform_view(respondents),
        screen_time_impact: screen_time_view(respondents),
        sleep_impact: sleep_view(respondents, sleep_fair_upper),
        age_group_data: age_group_view(respondents),
        gender_data: gender_view(respondents),
        exercise_impact: exercise_view(respondents),
    }
}
