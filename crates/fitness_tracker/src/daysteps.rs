//! Running step total for one tracked day.

use crate::metrics::{BiometricParams, MetricsEngine};
use crate::training::{WorkoutRecord, parse};
use crate::{Activity, TrackerError, TrackerResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::time::Duration;

/// Accumulates workouts for a single day. There is no reset; start a new
/// instance for the next day.
#[derive(Clone, Debug, PartialEq)]
pub struct DaySteps {
    day: NaiveDate,
    steps: u64,
    duration: Duration,
    records: usize,
}

/// Totals for a day, as walked distance and walking calories.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: NaiveDate,
    pub steps: u64,
    pub records: usize,
    pub duration_hours: f64,
    pub distance_km: f64,
    pub calories: f64,
}

impl DaySteps {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            steps: 0,
            duration: Duration::ZERO,
            records: 0,
        }
    }

    /// Start tracking the current local date.
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// Parse `raw` and add it to the totals. On error the totals are left
    /// untouched.
    pub fn add(&mut self, raw: &str) -> TrackerResult<()> {
        let record = parse(raw)?;
        self.add_record(&record);
        Ok(())
    }

    pub fn add_record(&mut self, record: &WorkoutRecord) {
        self.steps = self.steps.saturating_add(record.steps());
        self.duration = self.duration.saturating_add(record.duration());
        self.records += 1;
        tracing::debug!(day = %self.day, total = self.steps, "steps added");
    }

    pub fn total(&self) -> u64 {
        self.steps
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn records(&self) -> usize {
        self.records
    }

    /// Distance covered by all of the day's steps and the walking calories
    /// burned over the accumulated active time.
    pub fn summary(
        &self,
        engine: &MetricsEngine,
        biometrics: &BiometricParams,
    ) -> TrackerResult<DaySummary> {
        if self.records == 0 {
            return Err(TrackerError::InvalidInput(format!(
                "no workouts recorded for {}",
                self.day
            )));
        }
        let distance_km = engine.distance_km(self.steps, biometrics.height_cm)?;
        let as_walk = WorkoutRecord::new(self.steps, Activity::Walking.as_str(), self.duration)?;
        let calories = engine.walking_calories(&as_walk, biometrics)?;
        Ok(DaySummary {
            day: self.day,
            steps: self.steps,
            records: self.records,
            duration_hours: crate::duration::hours(self.duration),
            distance_km,
            calories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn starts_empty() {
        let ds = DaySteps::new(day());
        assert_eq!(ds.total(), 0);
        assert_eq!(ds.records(), 0);
        assert_eq!(ds.day(), day());
    }

    #[test]
    fn add_accumulates_steps_and_time() {
        let mut ds = DaySteps::new(day());
        ds.add("500,Walking,10m").unwrap();
        ds.add("300,Walking,5m").unwrap();
        assert_eq!(ds.total(), 800);
        assert_eq!(ds.records(), 2);
        assert_eq!(ds.duration(), Duration::from_secs(15 * 60));
    }

    #[test]
    fn failed_add_leaves_state_unchanged() {
        let mut ds = DaySteps::new(day());
        ds.add("500,Walking,10m").unwrap();
        let before = ds.clone();
        assert!(matches!(ds.add("0,Walking,1h"), Err(TrackerError::InvalidSteps(_))));
        assert!(matches!(ds.add("garbage"), Err(TrackerError::Format(_))));
        assert!(matches!(
            ds.add("10,Walking,0m"),
            Err(TrackerError::InvalidDuration(_))
        ));
        assert_eq!(ds, before);
    }

    #[test]
    fn unknown_activity_still_counts_steps() {
        let mut ds = DaySteps::new(day());
        ds.add("100,Swimming,1h").unwrap();
        assert_eq!(ds.total(), 100);
    }

    #[test]
    fn summary_reports_walk_over_whole_day() {
        let mut ds = DaySteps::new(day());
        ds.add("500,Walking,10m").unwrap();
        ds.add("300,Running,5m").unwrap();
        let bio = BiometricParams::new(70.0, 175.0).unwrap();
        let s = ds.summary(&MetricsEngine::default(), &bio).unwrap();
        assert_eq!(s.steps, 800);
        assert_eq!(s.records, 2);
        assert_eq!(s.duration_hours, 0.25);
        assert_eq!(format!("{:.2}", s.distance_km), "0.63");
        assert_eq!(format!("{:.2}", s.calories), "2.45");
    }

    #[test]
    fn summary_of_empty_day_fails() {
        let bio = BiometricParams::new(70.0, 175.0).unwrap();
        let res = DaySteps::new(day()).summary(&MetricsEngine::default(), &bio);
        assert!(matches!(res, Err(TrackerError::InvalidInput(_))));
    }

    #[test]
    fn summary_serializes_day_as_iso_date() {
        let mut ds = DaySteps::new(day());
        ds.add("500,Walking,10m").unwrap();
        let bio = BiometricParams::new(70.0, 175.0).unwrap();
        let s = ds.summary(&MetricsEngine::default(), &bio).unwrap();
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["day"], "2026-10-18");
        assert_eq!(v["steps"], 500);
        assert_eq!(v["records"], 1);
        for key in ["duration_hours", "distance_km", "calories"] {
            assert!(v[key].is_f64(), "{key}");
        }
    }
}
