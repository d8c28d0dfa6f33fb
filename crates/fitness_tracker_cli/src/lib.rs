//! Line-oriented front end for the `fitness_tracker` library.
//!
//! Each input line is one workout record. Valid records produce a report,
//! invalid ones are logged and skipped, and the day's summary is written
//! last.

use anyhow::Context;
use chrono::NaiveDate;
use fitness_tracker::{
    Activity, BiometricParams, Calibration, DaySteps, DerivedMetrics, MetricsEngine, WorkoutRecord,
    duration::hours, parse, report,
};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct CliConfig {
    pub biometrics: BiometricParams,
    pub calibration: Calibration,
    pub output: OutputFormat,
    pub day: NaiveDate,
    pub input: Option<PathBuf>,
}

impl CliConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    pub fn from_env_with<F>(mut get: F) -> anyhow::Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let weight = required_f64(&mut get, "TRACKER_WEIGHT_KG")?;
        let height = required_f64(&mut get, "TRACKER_HEIGHT_CM")?;
        let biometrics = BiometricParams::new(weight, height).context("invalid biometrics")?;
        let calibration = Calibration::from_env_with(&mut get)?;

        let output = match get("TRACKER_OUTPUT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => anyhow::bail!("TRACKER_OUTPUT must be text or json, got {other:?}"),
        };

        let day = match get("TRACKER_DAY") {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("TRACKER_DAY={raw:?} is not YYYY-MM-DD"))?,
            None => chrono::Local::now().date_naive(),
        };

        let input = get("TRACKER_INPUT").map(PathBuf::from);

        Ok(Self {
            biometrics,
            calibration,
            output,
            day,
            input,
        })
    }
}

fn required_f64<F>(get: &mut F, key: &str) -> anyhow::Result<f64>
where
    F: FnMut(&str) -> Option<String>,
{
    let raw = get(key).with_context(|| format!("{key} missing"))?;
    raw.trim()
        .parse()
        .with_context(|| format!("{key}={raw:?} is not a number"))
}

/// Log filter from `TRACKER_LOG_LEVEL`, then `RUST_LOG`, defaulting to `info`.
pub fn log_filter_from_env() -> String {
    std::env::var("TRACKER_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string())
}

pub fn env_filter(filter: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_new(filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub accepted: usize,
    pub rejected: usize,
    pub total_steps: u64,
}

#[derive(Serialize)]
struct RecordDto {
    steps: u64,
    activity: Activity,
    duration_hours: f64,
    #[serde(flatten)]
    metrics: DerivedMetrics,
}

/// Process every line of `input`, writing reports to `out`.
pub fn run<R: BufRead, W: Write>(
    cfg: &CliConfig,
    input: R,
    mut out: W,
) -> anyhow::Result<RunStats> {
    let engine = MetricsEngine::new(cfg.calibration.clone())?;
    let mut day = DaySteps::new(cfg.day);
    let mut stats = RunStats::default();

    for (idx, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let raw = line.trim_end_matches('\r');
        if raw.trim().is_empty() {
            continue;
        }

        let record = match parse(raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(line = idx + 1, error = %e, "skipping record");
                stats.rejected += 1;
                continue;
            }
        };
        day.add_record(&record);

        match engine.derive(&record, &cfg.biometrics) {
            Ok(metrics) => {
                write_record(cfg.output, &mut out, &record, &metrics, stats.accepted)?;
                stats.accepted += 1;
            }
            Err(e) => {
                tracing::warn!(line = idx + 1, error = %e, "steps counted, no report");
                stats.rejected += 1;
            }
        }
    }

    stats.total_steps = day.total();
    if day.records() > 0 {
        let summary = day.summary(&engine, &cfg.biometrics)?;
        match cfg.output {
            OutputFormat::Text => {
                if stats.accepted > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "{}", report::format_day_summary(&summary))?;
            }
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::json!({ "summary": summary }))?;
            }
        }
    }

    tracing::info!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        total_steps = stats.total_steps,
        "input processed"
    );
    Ok(stats)
}

fn write_record<W: Write>(
    output: OutputFormat,
    out: &mut W,
    record: &WorkoutRecord,
    metrics: &DerivedMetrics,
    previous: usize,
) -> anyhow::Result<()> {
    match output {
        OutputFormat::Text => {
            if previous > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{}", report::format(record, metrics)?)?;
        }
        OutputFormat::Json => {
            let dto = RecordDto {
                steps: record.steps(),
                activity: record.activity()?,
                duration_hours: hours(record.duration()),
                metrics: *metrics,
            };
            writeln!(out, "{}", serde_json::to_string(&dto)?)?;
        }
    }
    Ok(())
}
