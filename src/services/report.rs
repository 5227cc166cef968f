// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Loading a user's activities as a dataset for a date range.

use crate::db::{QueryRows, SqliteDb};
use crate::error::AppError;
use crate::services::dataset::{build, Dataset};
use crate::services::projection::project;
use crate::time_utils::{is_valid_date, ALL_DATES_END, ALL_DATES_START};
use serde::Serialize;

/// Exclusive `YYYY/MM/DD` bounds on the activity date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl Default for DateRange {
    /// Wide enough to cover every stored activity.
    fn default() -> Self {
        Self {
            start: ALL_DATES_START.to_string(),
            end: ALL_DATES_END.to_string(),
        }
    }
}

impl DateRange {
    /// Build a range from optional bounds; a missing bound falls back to the
    /// all-dates default.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self, AppError> {
        let defaults = Self::default();
        let start = start.map(str::trim).unwrap_or(defaults.start.as_str());
        let end = end.map(str::trim).unwrap_or(defaults.end.as_str());

        for (name, value) in [("start", start), ("end", end)] {
            if !is_valid_date(value) {
                return Err(AppError::BadRequest(format!(
                    "{name} date '{value}' is not in YYYY/MM/DD format"
                )));
            }
        }

        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
        })
    }
}

/// Message shown when a user has nothing to plot in the chosen range.
pub fn no_data_message(user_id: i64) -> String {
    format!("No data available for user_id {user_id} between the dates specified.")
}

/// Query, project and build the dataset for one user.
pub async fn load_dataset(
    db: &SqliteDb,
    user_id: i64,
    range: &DateRange,
) -> Result<Dataset, AppError> {
    let QueryRows { columns, rows } = db
        .select_activity_rows(user_id, &range.start, &range.end)
        .await?;
    let records = project(rows, &columns).map_err(anyhow::Error::from)?;
    let dataset = build(records);
    tracing::debug!(
        user_id,
        rows = dataset.len(),
        skipped = dataset.skipped.len(),
        "Built dataset"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityCreate, Category, UserCreate};

    #[test]
    fn test_range_defaults() {
        let range = DateRange::from_bounds(None, Some("2025/03/01")).unwrap();
        assert_eq!(range.start, "1981/01/01");
        assert_eq!(range.end, "2025/03/01");
    }

    #[test]
    fn test_range_rejects_malformed_bounds() {
        let err = DateRange::from_bounds(Some("2025-01-01"), None).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(DateRange::from_bounds(None, Some("2025/13/01")).is_err());
    }

    #[tokio::test]
    async fn test_load_dataset() {
        let db = SqliteDb::open_in_memory().unwrap();
        let user = db
            .create_user(UserCreate {
                name: "Test".to_string(),
                email: "test email".to_string(),
            })
            .await
            .unwrap();
        for (date, distance_km) in [("2025/02/10", 5.0), ("2025/02/11", 0.0)] {
            db.create_activity(ActivityCreate {
                user_id: user.user_id,
                date: date.to_string(),
                time_of_day: "06:30".to_string(),
                category: Category::Run,
                subtype: "road".to_string(),
                duration: "00:30:00".to_string(),
                distance_km,
                perceived_effort: 3,
                elevation_m: Some(12),
            })
            .await
            .unwrap();
        }

        let dataset = load_dataset(&db, user.user_id, &DateRange::default())
            .await
            .unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows[0].pace, "6:00");
        assert_eq!(dataset.rows[0].fields["elevation_m"], 12);
        assert_eq!(dataset.skipped.len(), 1);
        assert_eq!(dataset.skipped[0].id, Some(2));
    }
}
