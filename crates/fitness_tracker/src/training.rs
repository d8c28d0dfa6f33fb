//! Parsing of raw workout records.
//!
//! The canonical record format is `<steps>,<activity>,<duration>`, for
//! example `3456,Walking,3h00m`.

use crate::duration::parse_duration;
use crate::{Activity, TrackerError, TrackerResult};
use std::str::FromStr;
use std::time::Duration;

const FIELD_SEPARATOR: char = ',';
const FIELD_COUNT: usize = 3;

/// A validated workout. Steps and duration are always strictly positive.
///
/// The activity label is kept as written so that records for activities
/// without a calorie formula still parse; see [`WorkoutRecord::activity`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutRecord {
    steps: u64,
    label: String,
    duration: Duration,
}

impl WorkoutRecord {
    /// Build a record from already-split parts, applying the same positivity
    /// checks as [`parse`].
    pub fn new(steps: u64, label: impl Into<String>, duration: Duration) -> TrackerResult<Self> {
        if steps == 0 {
            return Err(TrackerError::InvalidSteps("0: must be positive".into()));
        }
        if duration.is_zero() {
            return Err(TrackerError::InvalidDuration("0s: must be positive".into()));
        }
        Ok(Self {
            steps,
            label: label.into(),
            duration,
        })
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Resolve the label into a known [`Activity`].
    pub fn activity(&self) -> TrackerResult<Activity> {
        Activity::from_label(&self.label)
    }
}

impl FromStr for WorkoutRecord {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse a raw record, validating field count, then steps, then duration.
pub fn parse(raw: &str) -> TrackerResult<WorkoutRecord> {
    let parts: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    if parts.len() != FIELD_COUNT {
        return Err(TrackerError::Format(format!(
            "expected {FIELD_COUNT} comma-separated fields, got {} in {raw:?}",
            parts.len()
        )));
    }

    let steps = parse_steps(parts[0])?;
    let duration = parse_duration(parts[2])?;
    if duration.is_zero() {
        return Err(TrackerError::InvalidDuration(format!(
            "{:?}: must be positive",
            parts[2]
        )));
    }

    tracing::debug!(steps, label = parts[1], secs = duration.as_secs(), "parsed workout record");
    WorkoutRecord::new(steps, parts[1], duration)
}

fn parse_steps(field: &str) -> TrackerResult<u64> {
    if field.chars().any(char::is_whitespace) {
        return Err(TrackerError::InvalidSteps(format!(
            "{field:?}: contains whitespace"
        )));
    }
    if field.starts_with('-') {
        return Err(TrackerError::InvalidSteps(format!(
            "{field:?}: must be positive"
        )));
    }
    let steps: u64 = field
        .parse()
        .map_err(|_| TrackerError::InvalidSteps(format!("{field:?}: not an integer")))?;
    if steps == 0 {
        return Err(TrackerError::InvalidSteps(format!(
            "{field:?}: must be positive"
        )));
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_record() {
        let rec = parse("3456,Walking,3h00m").unwrap();
        assert_eq!(rec.steps(), 3456);
        assert_eq!(rec.label(), "Walking");
        assert_eq!(rec.activity().unwrap(), Activity::Walking);
        assert_eq!(rec.duration(), Duration::from_secs(3 * 3600));
    }

    #[test]
    fn wrong_field_count_is_format_error() {
        for raw in ["", "3456", "3456,3h00m", "3456,Walking,3h,extra"] {
            assert!(
                matches!(parse(raw), Err(TrackerError::Format(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_steps() {
        for raw in [
            "0,Walking,1h",
            "-5,Walking,1h",
            "abc,Walking,1h",
            "1 000,Walking,1h",
            " 100,Walking,1h",
            "100 ,Walking,1h",
            ",Walking,1h",
        ] {
            assert!(
                matches!(parse(raw), Err(TrackerError::InvalidSteps(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn accepts_counts_beyond_i64() {
        let raw = format!("{},Walking,1h", u64::MAX);
        assert_eq!(parse(&raw).unwrap().steps(), u64::MAX);
        assert!(matches!(
            parse("18446744073709551616,Walking,1h"),
            Err(TrackerError::InvalidSteps(_))
        ));
    }

    #[test]
    fn negative_steps_report_sign() {
        let err = parse("-5,Walking,1h").unwrap_err();
        assert!(err.to_string().contains("must be positive"), "{err}");
    }

    #[test]
    fn rejects_bad_duration() {
        for raw in ["100,Walking,0h", "100,Walking,0h0m", "100,Walking,", "100,Walking,1x"] {
            assert!(
                matches!(parse(raw), Err(TrackerError::InvalidDuration(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn steps_are_checked_before_duration() {
        assert!(matches!(
            parse("0,Walking,0h"),
            Err(TrackerError::InvalidSteps(_))
        ));
    }

    #[test]
    fn unknown_activity_still_parses() {
        let rec = parse("100,Swimming,1h").unwrap();
        assert_eq!(rec.label(), "Swimming");
        assert!(matches!(
            rec.activity(),
            Err(TrackerError::UnknownActivity(_))
        ));
    }

    #[test]
    fn new_enforces_positive_values() {
        assert!(matches!(
            WorkoutRecord::new(0, "Walking", Duration::from_secs(60)),
            Err(TrackerError::InvalidSteps(_))
        ));
        assert!(matches!(
            WorkoutRecord::new(10, "Walking", Duration::ZERO),
            Err(TrackerError::InvalidDuration(_))
        ));
        let rec = WorkoutRecord::new(10, "Walking", Duration::from_secs(60)).unwrap();
        assert_eq!(rec, parse("10,Walking,1m").unwrap());
    }

    #[test]
    fn from_str_matches_parse() {
        let rec: WorkoutRecord = "500,running,10m".parse().unwrap();
        assert_eq!(rec, parse("500,running,10m").unwrap());
    }
}
