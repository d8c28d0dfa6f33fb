//! Duration expressions such as `3h00m`, `1h30m` or `45m`.
//!
//! Accepts one or more `<integer><unit>` pairs with unit `h`, `m` or `s`.
//! Pairs may repeat and are summed. Signs, fractions and whitespace are
//! rejected.

use crate::{TrackerError, TrackerResult};
use std::time::Duration;

/// Parse a duration expression. A zero total is allowed here; callers that
/// need a positive span check it themselves.
pub fn parse_duration(s: &str) -> TrackerResult<Duration> {
    if s.is_empty() {
        return Err(invalid(s, "empty"));
    }

    let mut total_secs: u64 = 0;
    let mut digits = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit_secs = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(invalid(s, "unexpected character")),
        };
        if digits.is_empty() {
            return Err(invalid(s, "unit without a number"));
        }
        let value: u64 = digits.parse().map_err(|_| invalid(s, "number too large"))?;
        digits.clear();
        total_secs = value
            .checked_mul(unit_secs)
            .and_then(|v| total_secs.checked_add(v))
            .ok_or_else(|| invalid(s, "overflow"))?;
    }
    if !digits.is_empty() {
        return Err(invalid(s, "missing unit"));
    }

    Ok(Duration::from_secs(total_secs))
}

/// Fractional hours, the unit every formula works in.
pub fn hours(d: Duration) -> f64 {
    d.as_secs_f64() / 3600.0
}

fn invalid(s: &str, reason: &str) -> TrackerError {
    TrackerError::InvalidDuration(format!("{s:?}: {reason}"))
}
