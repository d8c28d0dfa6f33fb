use crate::{TrackerError, TrackerResult};

/// How a step count is turned into a distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepLength {
    /// Stride is `height_m * ratio`.
    HeightRatio(f64),
    /// Stride is a constant number of metres.
    Fixed(f64),
}

/// Calibration constants for the distance and calorie formulas.
#[derive(Clone, Debug, PartialEq)]
pub struct Calibration {
    pub step_length: StepLength,
    /// C1: per-hour calories per kilogram common to both activities.
    pub calories_weight_multiplier: f64,
    /// C2: running speed term multiplier.
    pub run_speed_multiplier: f64,
    /// K: running speed divisor.
    pub run_speed_divisor: f64,
    /// C3: walking `speed² / height` term multiplier.
    pub walk_speed_height_multiplier: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            step_length: StepLength::HeightRatio(0.45),
            calories_weight_multiplier: 0.035,
            run_speed_multiplier: 0.035,
            run_speed_divisor: 1.5,
            walk_speed_height_multiplier: 0.029,
        }
    }
}

impl Calibration {
    pub fn from_env() -> Result<Self, TrackerError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads overrides through `get` instead of the
    /// process environment. Unset keys keep their default.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, TrackerError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(ratio) = positive(&mut get, "TRACKER_STEP_LENGTH_COEFFICIENT")? {
            cfg.step_length = StepLength::HeightRatio(ratio);
        }
        // a fixed stride wins over the height ratio when both are set
        if let Some(metres) = positive(&mut get, "TRACKER_FIXED_STEP_LENGTH_M")? {
            cfg.step_length = StepLength::Fixed(metres);
        }
        if let Some(v) = positive(&mut get, "TRACKER_CALORIES_WEIGHT_MULTIPLIER")? {
            cfg.calories_weight_multiplier = v;
        }
        if let Some(v) = positive(&mut get, "TRACKER_RUN_SPEED_MULTIPLIER")? {
            cfg.run_speed_multiplier = v;
        }
        if let Some(v) = positive(&mut get, "TRACKER_RUN_SPEED_DIVISOR")? {
            cfg.run_speed_divisor = v;
        }
        if let Some(v) = positive(&mut get, "TRACKER_WALK_SPEED_HEIGHT_MULTIPLIER")? {
            cfg.walk_speed_height_multiplier = v;
        }

        cfg.validate()?;
        tracing::debug!(?cfg, "calibration loaded");
        Ok(cfg)
    }

    /// Every constant must be a positive finite number.
    pub fn validate(&self) -> TrackerResult<()> {
        let stride = match self.step_length {
            StepLength::HeightRatio(ratio) => ("step length ratio", ratio),
            StepLength::Fixed(metres) => ("fixed step length", metres),
        };
        for (name, value) in [
            stride,
            ("calories weight multiplier", self.calories_weight_multiplier),
            ("run speed multiplier", self.run_speed_multiplier),
            ("run speed divisor", self.run_speed_divisor),
            ("walk speed/height multiplier", self.walk_speed_height_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TrackerError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn positive<F>(get: &mut F, key: &str) -> Result<Option<f64>, TrackerError>
where
    F: FnMut(&str) -> Option<String>,
{
    let Some(raw) = get(key) else {
        return Ok(None);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TrackerError::Config(format!("{key}={raw:?} is not a number")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(TrackerError::Config(format!("{key}={raw:?} must be positive")));
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_defaults_when_unset() {
        let cfg = Calibration::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg, Calibration::default());
        assert_eq!(cfg.step_length, StepLength::HeightRatio(0.45));
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            "TRACKER_STEP_LENGTH_COEFFICIENT" => Some("0.4".into()),
            "TRACKER_RUN_SPEED_DIVISOR" => Some("1000".into()),
            "TRACKER_WALK_SPEED_HEIGHT_MULTIPLIER" => Some(" 0.03 ".into()),
            _ => None,
        };
        let cfg = Calibration::from_env_with(get).expect("cfg");
        assert_eq!(cfg.step_length, StepLength::HeightRatio(0.4));
        assert_eq!(cfg.run_speed_divisor, 1000.0);
        assert_eq!(cfg.walk_speed_height_multiplier, 0.03);
        assert_eq!(cfg.calories_weight_multiplier, 0.035);
    }

    #[test]
    fn fixed_step_length_overrides_ratio() {
        let get = |k: &str| match k {
            "TRACKER_STEP_LENGTH_COEFFICIENT" => Some("0.4".into()),
            "TRACKER_FIXED_STEP_LENGTH_M" => Some("0.65".into()),
            _ => None,
        };
        let cfg = Calibration::from_env_with(get).expect("cfg");
        assert_eq!(cfg.step_length, StepLength::Fixed(0.65));
    }

    #[test]
    fn from_env_rejects_garbage() {
        let res = Calibration::from_env_with(|k| {
            (k == "TRACKER_RUN_SPEED_MULTIPLIER").then(|| "fast".to_string())
        });
        assert!(matches!(res, Err(TrackerError::Config(_))));

        let res = Calibration::from_env_with(|k| {
            (k == "TRACKER_RUN_SPEED_DIVISOR").then(|| "0".to_string())
        });
        assert!(matches!(res, Err(TrackerError::Config(_))));
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(Calibration::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_hand_built_values() {
        let zero_divisor = Calibration {
            run_speed_divisor: 0.0,
            ..Calibration::default()
        };
        assert!(matches!(zero_divisor.validate(), Err(TrackerError::Config(_))));

        let negative = Calibration {
            calories_weight_multiplier: -1.0,
            ..Calibration::default()
        };
        assert!(matches!(negative.validate(), Err(TrackerError::Config(_))));

        let bad_stride = Calibration {
            step_length: StepLength::Fixed(-0.65),
            ..Calibration::default()
        };
        assert!(bad_stride.validate().is_err());
    }
}
