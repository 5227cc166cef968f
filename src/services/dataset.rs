// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory activity dataset with derived pace columns.
//!
//! A dataset is built fresh for every query and thrown away once the chart
//! or aggregate that needed it has been produced.
//!
//! Two recovery rules apply while building:
//! - an unparseable `date` becomes a missing date and the row is kept;
//! - a row whose pace cannot be computed (missing or non-positive distance,
//!   malformed duration) is left out and listed in [`Dataset::skipped`].

use crate::error::DataError;
use crate::models::activity::columns;
use crate::services::pace::{pace_for_moving_time, Pace};
use crate::services::projection::Record;
use crate::time_utils::{format_activity_date, parse_activity_date};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// One activity with its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetRow {
    /// `None` when the stored date was not a valid `YYYY/MM/DD` date
    #[serde(serialize_with = "serialize_date")]
    pub date: Option<NaiveDate>,
    /// `M:SS` minutes per km
    pub pace: String,
    /// Float minutes per km
    pub pace_numeric: f64,
    /// Remaining columns, untouched
    #[serde(flatten)]
    pub fields: Record,
}

impl DatasetRow {
    pub fn id(&self) -> Option<i64> {
        self.fields.get(columns::ID).and_then(Value::as_i64)
    }

    /// Read a date column. `date` is the parsed column; any other column is
    /// parsed on the fly.
    pub fn date_column(&self, field: &str) -> Option<NaiveDate> {
        if field == columns::DATE {
            return self.date;
        }
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .and_then(parse_activity_date)
    }

    /// Read a numeric column, including the derived `pace_numeric`.
    pub fn numeric(&self, field: &str) -> Option<f64> {
        if field == columns::PACE_NUMERIC {
            return Some(self.pace_numeric);
        }
        self.fields.get(field).and_then(Value::as_f64)
    }
}

/// A record left out of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// Position in the input records
    pub index: usize,
    pub id: Option<i64>,
    pub reason: String,
}

/// Activities for one query, in storage order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub rows: Vec<DatasetRow>,
    pub skipped: Vec<SkippedRow>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build a dataset from keyed records.
pub fn build(records: Vec<Record>) -> Dataset {
    let mut dataset = Dataset::default();

    for (index, mut record) in records.into_iter().enumerate() {
        let pace = match record_pace(&record) {
            Ok(pace) => pace,
            Err(err) => {
                let id = record.get(columns::ID).and_then(Value::as_i64);
                tracing::warn!(row = index, id = ?id, error = %err, "Skipping row without a pace");
                dataset.skipped.push(SkippedRow {
                    index,
                    id,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let date = record
            .remove(columns::DATE)
            .and_then(|v| v.as_str().and_then(parse_activity_date));

        dataset.rows.push(DatasetRow {
            date,
            pace: pace.text,
            pace_numeric: pace.numeric,
            fields: record,
        });
    }

    dataset
}

fn record_pace(record: &Record) -> Result<Pace, DataError> {
    let distance = record
        .get(columns::DISTANCE_KM)
        .and_then(Value::as_f64)
        .ok_or_else(|| DataError::Format("distance_km is missing or not a number".to_string()))?;
    let duration = record
        .get(columns::DURATION)
        .and_then(Value::as_str)
        .ok_or_else(|| DataError::Format("duration is missing or not text".to_string()))?;
    pace_for_moving_time(distance, duration)
}

fn serialize_date<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(d) => serializer.serialize_str(&format_activity_date(*d)),
        None => serializer.serialize_none(),
    }
}
