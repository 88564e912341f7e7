use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::errors::CostModelError;

/// Layout of the `start`/`end` bounds accepted by ranged cost queries,
/// e.g. `2024-03-01T00:00:00.000Z`.
pub const RANGE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

pub fn parse_range_timestamp(
    field: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, CostModelError> {
    NaiveDateTime::parse_from_str(raw, RANGE_TIMESTAMP_FORMAT)
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
        .map_err(|e| CostModelError::TimeParse {
            field,
            raw: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Parses a strictly positive duration such as `1h`, `90s` or `1h30m`.
pub fn parse_step(field: &'static str, raw: &str) -> Result<Duration, CostModelError> {
    let to_err = |reason: String| CostModelError::TimeParse {
        field,
        raw: raw.to_string(),
        reason,
    };

    let step = parse_duration(raw).map_err(to_err)?;
    if step.is_zero() {
        return Err(to_err("step must be greater than zero".into()));
    }
    Ok(step)
}

/// Parses a duration made of decimal numbers with unit suffixes
/// (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`), e.g. `300ms`, `1.5h`, `2h45m`.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let mut rest = raw.strip_prefix('+').unwrap_or(raw);
    if rest.starts_with('-') {
        return Err("negative durations are not supported".into());
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err("empty duration".into());
    }

    let mut total_nanos = 0.0_f64;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_end];
        if number.is_empty() || number == "." {
            return Err(format!("expected a number before '{}'", rest));
        }
        rest = &rest[number_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];

        let nanos_per_unit = match unit {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            "" => return Err(format!("missing unit after '{}'", number)),
            other => return Err(format!("unknown unit '{}'", other)),
        };

        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid number '{}'", number))?;
        total_nanos += value * nanos_per_unit;
    }

    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return Err("duration out of range".into());
    }
    Ok(Duration::from_nanos(total_nanos.round() as u64))
}
