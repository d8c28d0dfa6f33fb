//! Fixed-template text reports.

use crate::daysteps::DaySummary;
use crate::duration::hours;
use crate::metrics::DerivedMetrics;
use crate::training::WorkoutRecord;
use crate::{Activity, TrackerResult};
use std::time::Duration;

/// Five-line workout report. Lines are joined by `\n` with no trailing
/// newline.
pub fn format_report(activity: Activity, duration: Duration, metrics: &DerivedMetrics) -> String {
    [
        format!("Activity: {activity}"),
        format!("Duration: {:.2} h.", hours(duration)),
        format!("Distance: {:.2} km.", metrics.distance_km),
        format!("Speed: {:.2} km/h", metrics.mean_speed_kmh),
        format!("Calories burned: {:.2}", metrics.calories),
    ]
    .join("\n")
}

/// Report for a parsed record. Fails only when the record's label is not a
/// known activity.
pub fn format(record: &WorkoutRecord, metrics: &DerivedMetrics) -> TrackerResult<String> {
    Ok(format_report(record.activity()?, record.duration(), metrics))
}

pub fn format_day_summary(summary: &DaySummary) -> String {
    [
        format!("Date: {}", summary.day.format("%Y-%m-%d")),
        format!("Steps: {}.", summary.steps),
        format!("Distance: {:.2} km.", summary.distance_km),
        format!("Calories burned: {:.2}", summary.calories),
    ]
    .join("\n")
}
