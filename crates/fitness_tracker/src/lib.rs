//! Workout record parsing and derived fitness metrics.
//!
//! A raw record such as `"3456,Walking,3h00m"` is parsed into a
//! [`WorkoutRecord`], turned into [`DerivedMetrics`] by the
//! [`MetricsEngine`](metrics::MetricsEngine) and rendered by the
//! [`report`] module. [`DaySteps`](daysteps::DaySteps) keeps a running step
//! total for a single tracked day.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod config;
pub mod daysteps;
pub mod duration;
pub mod metrics;
pub mod report;
pub mod training;

pub use config::{Calibration, StepLength};
pub use daysteps::{DaySteps, DaySummary};
pub use metrics::{BiometricParams, DerivedMetrics, MetricsEngine};
pub use training::{WorkoutRecord, parse};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    #[error("invalid data format: {0}")]
    Format(String),
    #[error("invalid steps: {0}")]
    InvalidSteps(String),
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown activity: {0:?}")]
    UnknownActivity(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl TrackerError {
    /// True for failures raised while parsing a raw record.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            TrackerError::Format(_) | TrackerError::InvalidSteps(_) | TrackerError::InvalidDuration(_)
        )
    }
}

/// Result type alias for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Activity kinds with their own calorie formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Activity {
    Walking,
    Running,
}

impl Activity {
    /// Resolve a free-form label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> TrackerResult<Self> {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case("walking") {
            Ok(Activity::Walking)
        } else if trimmed.eq_ignore_ascii_case("running") {
            Ok(Activity::Running)
        } else {
            Err(TrackerError::UnknownActivity(label.to_string()))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Walking => "Walking",
            Activity::Running => "Running",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activity::from_label(s)
    }
}
