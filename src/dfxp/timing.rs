use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::DfxpError;

// @const: Clock time, HH:MM:SS with optional fraction
static CLOCK_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2})(?:\.(\d+))?$").expect("Invalid clock time regex")
});

// @const: Offset time, a number with a unit
static OFFSET_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)(h|ms|m|s)$").expect("Invalid offset time regex")
});

/// Parse a DFXP time expression to milliseconds; empty means unset
pub fn parse_time_expression(value: &str) -> Result<Option<u64>, DfxpError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    if let Some(caps) = CLOCK_TIME_REGEX.captures(value) {
        let hours: u64 = parse_component(&caps[1], value)?;
        let minutes: u64 = parse_component(&caps[2], value)?;
        let seconds: u64 = parse_component(&caps[3], value)?;
        if minutes >= 60 || seconds >= 60 {
            return Err(DfxpError::InvalidTime(value.to_string()));
        }
        // Only the first three fraction digits matter at millisecond precision
        let millis = match caps.get(4) {
            Some(fraction) => {
                let digits: String = fraction.as_str().chars().chain("000".chars()).take(3).collect();
                parse_component(&digits, value)?
            }
            None => 0,
        };
        let total = hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .ok_or_else(|| DfxpError::InvalidTime(value.to_string()))?;
        return Ok(Some(total));
    }

    if let Some(caps) = OFFSET_TIME_REGEX.captures(value) {
        let amount: f64 = caps[1]
            .parse()
            .map_err(|_| DfxpError::InvalidTime(value.to_string()))?;
        let scale = match &caps[2] {
            "h" => 3_600_000.0,
            "m" => 60_000.0,
            "s" => 1_000.0,
            _ => 1.0,
        };
        let ms = (amount * scale).round();
        // u64::MAX rounds up to 2^64 as f64
        if !ms.is_finite() || ms >= u64::MAX as f64 {
            return Err(DfxpError::InvalidTime(value.to_string()));
        }
        return Ok(Some(ms as u64));
    }

    Err(DfxpError::InvalidTime(value.to_string()))
}

fn parse_component(digits: &str, value: &str) -> Result<u64, DfxpError> {
    digits
        .parse()
        .map_err(|_| DfxpError::InvalidTime(value.to_string()))
}

/// Format milliseconds as a DFXP clock time (HH:MM:SS.mmm)
pub fn format_time_expression(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}
