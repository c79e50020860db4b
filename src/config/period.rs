//! Duration parser for `--period` and `--timeout`.
//!
//! Accepts Go-style durations: a sequence of decimal numbers each followed by
//! a unit, e.g. `30s`, `1.5m`, `1h30m`, `250ms`. A bare `0` means zero.
//! Units: `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse duration '{input}': {message}")]
pub struct DurationParseError {
    pub input: String,
    pub message: String,
}

impl DurationParseError {
    fn new(input: &str, message: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let s = input.trim();

    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(DurationParseError::new(input, "empty duration"));
    }
    if s.starts_with('-') {
        return Err(DurationParseError::new(input, "negative durations are not allowed"));
    }

    let mut rest = s.strip_prefix('+').unwrap_or(s);
    let mut total_nanos: u128 = 0;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number_str, after_number) = rest.split_at(number_len);

        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, after_unit) = after_number.split_at(unit_len);

        let unit_nanos: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3_600 * NANOS_PER_SEC,
            "" => {
                return Err(DurationParseError::new(
                    input,
                    "missing unit (use ns, us, ms, s, m, h)",
                ));
            }
            other => {
                return Err(DurationParseError::new(
                    input,
                    format!("unknown unit '{}'", other),
                ));
            }
        };

        let nanos = scaled_nanos(number_str, unit_nanos)
            .ok_or_else(|| DurationParseError::new(input, format!("invalid number '{}'", number_str)))?;
        total_nanos = total_nanos
            .checked_add(nanos)
            .ok_or_else(|| DurationParseError::new(input, "duration out of range"))?;
        rest = after_unit;
    }

    let secs = u64::try_from(total_nanos / NANOS_PER_SEC)
        .map_err(|_| DurationParseError::new(input, "duration out of range"))?;
    Ok(Duration::new(secs, (total_nanos % NANOS_PER_SEC) as u32))
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// `number` (decimal, optional fraction) times `unit_nanos`, truncated
fn scaled_nanos(number: &str, unit_nanos: u128) -> Option<u128> {
    let (whole, fraction) = match number.split_once('.') {
        Some((w, f)) => (w, f),
        None => (number, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole_value: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole_value.checked_mul(unit_nanos)?;

    // digits past nanosecond precision of an hour can't matter
    let fraction = &fraction[..fraction.len().min(18)];
    if !fraction.is_empty() {
        let scale = 10u128.pow(fraction.len() as u32);
        let fraction_value: u128 = fraction.parse().ok()?;
        nanos = nanos.checked_add(fraction_value.checked_mul(unit_nanos)? / scale)?;
    }

    Some(nanos)
}
