//! Distance, speed and calorie formulas.
//!
//! Speeds are in km/h and heights enter the calorie formulas in metres.
//! Every entry point re-checks its inputs, so a hand-built record or
//! biometric set with a non-positive value fails with
//! [`TrackerError::InvalidInput`] instead of producing a number.

use crate::config::{Calibration, StepLength};
use crate::duration::hours;
use crate::training::WorkoutRecord;
use crate::{Activity, TrackerError, TrackerResult};
use serde::Serialize;
use std::time::Duration;

const M_IN_KM: f64 = 1000.0;
const CM_IN_M: f64 = 100.0;

/// Body measurements supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiometricParams {
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl BiometricParams {
    pub fn new(weight_kg: f64, height_cm: f64) -> TrackerResult<Self> {
        let params = Self {
            weight_kg,
            height_cm,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> TrackerResult<()> {
        ensure_positive("weight", self.weight_kg)?;
        ensure_positive("height", self.height_cm)
    }

    fn height_m(&self) -> f64 {
        self.height_cm / CM_IN_M
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub distance_km: f64,
    pub mean_speed_kmh: f64,
    pub calories: f64,
}

/// Applies the formulas with a fixed [`Calibration`].
#[derive(Clone, Debug, Default)]
pub struct MetricsEngine {
    calibration: Calibration,
}

impl MetricsEngine {
    /// Fails with [`TrackerError::Config`] when any calibration value is not
    /// a positive finite number.
    pub fn new(calibration: Calibration) -> TrackerResult<Self> {
        calibration.validate()?;
        Ok(Self { calibration })
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Stride length in metres for the given height.
    pub fn step_length_m(&self, height_cm: f64) -> TrackerResult<f64> {
        ensure_positive("height", height_cm)?;
        Ok(match self.calibration.step_length {
            StepLength::HeightRatio(ratio) => height_cm / CM_IN_M * ratio,
            StepLength::Fixed(metres) => metres,
        })
    }

    pub fn distance_km(&self, steps: u64, height_cm: f64) -> TrackerResult<f64> {
        if steps == 0 {
            return Err(TrackerError::InvalidInput("steps must be positive".into()));
        }
        Ok(steps as f64 * self.step_length_m(height_cm)? / M_IN_KM)
    }

    /// Mean speed over `duration`; zero when the duration is zero.
    pub fn mean_speed_kmh(&self, distance_km: f64, duration: Duration) -> TrackerResult<f64> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(TrackerError::InvalidInput(format!(
                "distance must be non-negative, got {distance_km}"
            )));
        }
        if duration.is_zero() {
            return Ok(0.0);
        }
        Ok(distance_km / hours(duration))
    }

    pub fn walking_calories(
        &self,
        record: &WorkoutRecord,
        biometrics: &BiometricParams,
    ) -> TrackerResult<f64> {
        let motion = self.motion(record, biometrics)?;
        Ok(self.walking_formula(&motion, biometrics))
    }

    pub fn running_calories(
        &self,
        record: &WorkoutRecord,
        biometrics: &BiometricParams,
    ) -> TrackerResult<f64> {
        let motion = self.motion(record, biometrics)?;
        Ok(self.running_formula(&motion, biometrics))
    }

    /// Pick the calorie formula matching the record's activity.
    pub fn calories(
        &self,
        record: &WorkoutRecord,
        biometrics: &BiometricParams,
    ) -> TrackerResult<f64> {
        let activity = record.activity()?;
        let motion = self.motion(record, biometrics)?;
        Ok(self.calories_for(activity, &motion, biometrics))
    }

    /// Distance, speed and calories for one record.
    pub fn derive(
        &self,
        record: &WorkoutRecord,
        biometrics: &BiometricParams,
    ) -> TrackerResult<DerivedMetrics> {
        let activity = record.activity()?;
        let motion = self.motion(record, biometrics)?;
        let calories = self.calories_for(activity, &motion, biometrics);
        tracing::debug!(
            distance_km = motion.distance_km,
            mean_speed_kmh = motion.speed_kmh,
            calories,
            "derived workout metrics"
        );
        Ok(DerivedMetrics {
            distance_km: motion.distance_km,
            mean_speed_kmh: motion.speed_kmh,
            calories,
        })
    }

    fn calories_for(&self, activity: Activity, motion: &Motion, biometrics: &BiometricParams) -> f64 {
        match activity {
            Activity::Walking => self.walking_formula(motion, biometrics),
            Activity::Running => self.running_formula(motion, biometrics),
        }
    }

    fn walking_formula(&self, motion: &Motion, biometrics: &BiometricParams) -> f64 {
        let c = &self.calibration;
        let w = biometrics.weight_kg;
        (c.calories_weight_multiplier * w
            + (motion.speed_kmh.powi(2) / biometrics.height_m()) * c.walk_speed_height_multiplier * w)
            * motion.hours
    }

    fn running_formula(&self, motion: &Motion, biometrics: &BiometricParams) -> f64 {
        let c = &self.calibration;
        let w = biometrics.weight_kg;
        (c.calories_weight_multiplier * w
            + (motion.speed_kmh / c.run_speed_divisor) * c.run_speed_multiplier * w)
            * motion.hours
    }

    /// Validated distance, speed and elapsed hours for a record.
    fn motion(&self, record: &WorkoutRecord, biometrics: &BiometricParams) -> TrackerResult<Motion> {
        biometrics.validate()?;
        if record.duration().is_zero() {
            return Err(TrackerError::InvalidInput("duration must be positive".into()));
        }
        let distance_km = self.distance_km(record.steps(), biometrics.height_cm)?;
        let speed_kmh = self.mean_speed_kmh(distance_km, record.duration())?;
        Ok(Motion {
            distance_km,
            speed_kmh,
            hours: hours(record.duration()),
        })
    }
}

struct Motion {
    distance_km: f64,
    speed_kmh: f64,
    hours: f64,
}

pub(crate) fn ensure_positive(name: &str, value: f64) -> TrackerResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TrackerError::InvalidInput(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
