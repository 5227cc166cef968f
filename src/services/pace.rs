// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pace (minutes per km) calculation and formatting.

use crate::error::DataError;
use crate::time_utils::parse_duration_secs;
use serde::Serialize;

/// Pace of an activity in minutes per km.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pace {
    /// `M:SS` text, seconds truncated.
    pub text: String,
    /// Float minutes, rounded to 2 decimals.
    pub numeric: f64,
}

/// Compute pace from a distance in km and an elapsed time in seconds.
pub fn pace_from_duration(distance_km: f64, duration_secs: u64) -> Result<Pace, DataError> {
    // Also rejects NaN.
    if !(distance_km > 0.0) {
        return Err(DataError::Division(format!(
            "cannot compute pace for distance {distance_km} km"
        )));
    }

    let secs_per_km = duration_secs as f64 / distance_km;
    let minutes = (secs_per_km / 60.0).floor() as u64;
    let seconds = (secs_per_km % 60.0).floor() as u64;
    let text = format!("{minutes}:{seconds:02}");
    let numeric = pace_float(&text)?;

    Ok(Pace { text, numeric })
}

/// Compute pace from a distance and an `HH:MM:SS` moving time.
pub fn pace_for_moving_time(distance_km: f64, moving_time: &str) -> Result<Pace, DataError> {
    pace_from_duration(distance_km, parse_duration_secs(moving_time)?)
}

/// Convert an `M:SS` pace into float minutes, e.g. `"6:53"` -> `6.88`.
pub fn pace_float(text: &str) -> Result<f64, DataError> {
    let invalid = || DataError::Format(format!("pace '{text}' does not match M:SS"));

    let (minutes, seconds) = text.split_once(':').ok_or_else(invalid)?;
    let minutes: u64 = parse_digits(minutes).ok_or_else(invalid)?;
    let seconds: u64 = parse_digits(seconds).ok_or_else(invalid)?;
    if seconds >= 60 {
        return Err(invalid());
    }

    Ok(round2(minutes as f64 + seconds as f64 / 60.0))
}

fn parse_digits(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
