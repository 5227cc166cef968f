// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for activity date, time-of-day and duration text.

use crate::error::DataError;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

/// External textual form of an activity date.
pub const DATE_FORMAT: &str = "%Y/%m/%d";
/// External textual form of an activity start time.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Earliest bound used when a caller asks for "all" activities.
pub const ALL_DATES_START: &str = "1981/01/01";
/// Latest bound used when a caller asks for "all" activities.
pub const ALL_DATES_END: &str = "2081/01/01";

/// Parse an `HH:MM:SS` moving time into total seconds.
///
/// Any non-negative hour count is accepted as long as the total fits in a
/// `u64`; minutes and seconds are not range-checked here (the record
/// validator does that).
pub fn parse_duration_secs(text: &str) -> Result<u64, DataError> {
    let [hours, minutes, seconds] = split_duration(text)?;
    hours
        .checked_mul(3600)
        .and_then(|secs| minutes.checked_mul(60)?.checked_add(secs))
        .and_then(|secs| secs.checked_add(seconds))
        .ok_or_else(|| DataError::Range(format!("duration '{text}' is too long")))
}

/// Split an `HH:MM:SS` string into its three integer components.
pub fn split_duration(text: &str) -> Result<[u64; 3], DataError> {
    let invalid = || DataError::Format("duration does not match HH:MM:SS".to_string());

    let mut components = [0u64; 3];
    let mut parts = text.split(':');
    for slot in components.iter_mut() {
        let part = parts.next().ok_or_else(invalid)?;
        *slot = parse_component(part).ok_or_else(invalid)?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(components)
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Check an activity date against `YYYY/MM/DD`.
///
/// The month must be `01`-`12`; the day only has to be two digits, so
/// `2025/02/31` passes. Full calendar checking happens when the dataset is
/// built, where an impossible date becomes a missing date.
pub fn is_valid_date(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'/' || bytes[7] != b'/' {
        return false;
    }
    let digits_at = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    if !(digits_at(0..4) && digits_at(5..7) && digits_at(8..10)) {
        return false;
    }
    matches!((bytes[5], bytes[6]), (b'0', b'1'..=b'9') | (b'1', b'0'..=b'2'))
}

/// Check a wall-clock start time against `HH:MM`.
pub fn is_valid_time_of_day(text: &str) -> bool {
    text.len() == 5 && NaiveTime::parse_from_str(text, TIME_OF_DAY_FORMAT).is_ok()
}

/// Parse an activity date, returning `None` for anything that is not a real
/// `YYYY/MM/DD` calendar date.
pub fn parse_activity_date(text: &str) -> Option<NaiveDate> {
    if !is_valid_date(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Format a date in the activity `YYYY/MM/DD` form.
pub fn format_activity_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Monday-to-Sunday bounds of the calendar week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    (start, start + Duration::days(6))
}

/// Serde adapter for dates written as `YYYY/MM/DD`.
pub mod slash_date {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
