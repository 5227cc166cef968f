// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reshape positional query rows into keyed records.

use crate::error::DataError;
use serde_json::{Map, Value};

/// One row keyed by column name.
pub type Record = Map<String, Value>;

/// Zip every row with the column names. Output order matches input order.
pub fn project(rows: Vec<Vec<Value>>, column_names: &[String]) -> Result<Vec<Record>, DataError> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            if row.len() != column_names.len() {
                return Err(DataError::Format(format!(
                    "row {index} has {} values but {} columns were named",
                    row.len(),
                    column_names.len()
                )));
            }
            Ok(column_names.iter().cloned().zip(row).collect())
        })
        .collect()
}
