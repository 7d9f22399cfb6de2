use chrono::{NaiveDateTime, TimeDelta};

use crate::shared::constants::LOG_TIMESTAMP_FORMAT;
use crate::shared::error::SurveyError;

/// Formats a relative offset as `HH:MM:SS`, truncating sub-second parts.
///
/// Hours are not wrapped at 24, so multi-day spans stay monotonic.
pub fn format_timecode(offset: TimeDelta) -> String {
    let total = offset.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
}

/// Converts fractional seconds to a millisecond-resolution duration.
pub fn delta_from_secs(secs: f64) -> TimeDelta {
    TimeDelta::milliseconds((secs * 1000.0).round() as i64)
}

/// Fractional seconds of a duration, at millisecond resolution.
pub fn delta_to_secs(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 1000.0
}

/// Parses a `YYYY-MM-DD HH:MM:SS` log cell. `context` names the file and row.
pub fn parse_log_timestamp(
    value: &str,
    context: impl Into<String>,
) -> Result<NaiveDateTime, SurveyError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, LOG_TIMESTAMP_FORMAT).map_err(|source| {
        SurveyError::InvalidTimestamp {
            value: value.to_string(),
            context: context.into(),
            source,
        }
    })
}
