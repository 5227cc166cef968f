// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly totals over an activity dataset.

use crate::models::WeeklyBucket;
use crate::services::dataset::Dataset;
use crate::time_utils::week_bounds;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Sum `value_field` per Monday-to-Sunday week of `date_field`.
///
/// Rows without a date are left out. Values that are missing or not numeric
/// add nothing but still mark their week as present. Only weeks that occur
/// in the dataset are returned, oldest first.
pub fn aggregate_weekly(dataset: &Dataset, date_field: &str, value_field: &str) -> Vec<WeeklyBucket> {
    let mut weeks: BTreeMap<NaiveDate, WeeklyBucket> = BTreeMap::new();

    for row in &dataset.rows {
        let Some(date) = row.date_column(date_field) else {
            continue;
        };
        let (week_start, week_end) = week_bounds(date);
        let bucket = weeks.entry(week_start).or_insert_with(|| WeeklyBucket {
            week_start,
            week_end,
            total: 0.0,
            rows: 0,
        });
        bucket.total += row.numeric(value_field).unwrap_or(0.0);
        bucket.rows += 1;
    }

    weeks.into_values().collect()
}
