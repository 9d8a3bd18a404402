// src/aggregate/buckets.rs

//! Bucket definitions for the range-based views.
//!
//! Each bucket enum is declared in its output order, so the derived `Ord`
//! doubles as the sort key for the view.

/// Screen time, hours per day. Medium is closed on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScreenTimeBucket {
    Low,
    Medium,
    High,
}

impl ScreenTimeBucket {
    pub fn classify(hours: f64) -> Self {
        if hours < 4.0 {
            Self::Low
        } else if hours <= 6.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low (< 4 hrs)",
            Self::Medium => "Medium (4-6 hrs)",
            Self::High => "High (6+ hrs)",
        }
    }
}

/// Upper bound of the "Fair" sleep bucket. Two deployments disagreed on it;
/// seven is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SleepFairUpper {
    Six,
    #[default]
    Seven,
}

impl SleepFairUpper {
    pub fn value(self) -> f64 {
        match self {
            Self::Six => 6.0,
            Self::Seven => 7.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SleepBucket {
    Poor,
    Fair,
    Good,
}

impl SleepBucket {
    pub fn classify(quality: f64, upper: SleepFairUpper) -> Self {
        if quality < 5.0 {
            Self::Poor
        } else if quality <= upper.value() {
            Self::Fair
        } else {
            Self::Good
        }
    }

    pub fn label(self, upper: SleepFairUpper) -> &'static str {
        match (self, upper) {
            (Self::Poor, _) => "Poor (< 5)",
            (Self::Fair, SleepFairUpper::Seven) => "Fair (5-7)",
            (Self::Fair, SleepFairUpper::Six) => "Fair (5-6)",
            (Self::Good, SleepFairUpper::Seven) => "Good (7+)",
            (Self::Good, SleepFairUpper::Six) => "Good (6+)",
        }
    }
}

/// Age bands. Respondents under 18 get their own band ahead of the adult
/// ones instead of being folded into `45+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBucket {
    Under18,
    From18To24,
    From25To34,
    From35To44,
    From45,
}

impl AgeBucket {
    pub fn classify(age: i64) -> Self {
        match age {
            i64::MIN..=17 => Self::Under18,
            18..=24 => Self::From18To24,
            25..=34 => Self::From25To34,
            35..=44 => Self::From35To44,
            _ => Self::From45,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Under18 => "Under 18",
            Self::From18To24 => "18-24",
            Self::From25To34 => "25-34",
            Self::From35To44 => "35-44",
            Self::From45 => "45+",
        }
    }
}

/// Exercise sessions per week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExerciseBucket {
    Low,
    Medium,
    High,
}

impl ExerciseBucket {
    pub fn classify(per_week: f64) -> Self {
        if per_week < 2.0 {
            Self::Low
        } else if per_week <= 4.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low (< 2/week)",
            Self::Medium => "Medium (2-4/week)",
            Self::High => "High (4+/week)",
        }
    }
}
