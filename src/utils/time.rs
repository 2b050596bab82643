//! Time utilities: parsing HH:MM and availability ranges typed on the command line.

use crate::errors::{AppError, AppResult};
use crate::models::interval::Interval;
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Empty stays empty (an unfinished field); anything else must be `HH:MM`
/// and comes back zero-padded.
pub fn normalize_time(t: &str) -> AppResult<String> {
    let t = t.trim();
    if t.is_empty() {
        return Ok(String::new());
    }
    parse_time(t)
        .map(|tm| tm.format("%H:%M").to_string())
        .ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// Parse `HH:MM-HH:MM`. Either side may be left empty (`12:00-`), which
/// yields an incomplete interval rather than an error.
pub fn parse_interval_arg(s: &str) -> AppResult<Interval> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| AppError::InvalidTime(format!("{s} (expected HH:MM-HH:MM)")))?;

    Ok(Interval::new(normalize_time(start)?, normalize_time(end)?))
}
