// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user dataset, weekly totals and chart series.

use crate::error::{AppError, Result};
use crate::models::activity::columns;
use crate::models::WeeklyBucket;
use crate::services::{
    aggregate_weekly, build_chart, load_dataset, no_data_message, ChartError, ChartKind,
    ChartSeries, Dataset, DateRange,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}/dataset", get(get_dataset))
        .route("/users/{user_id}/weekly", get(get_weekly))
        .route("/users/{user_id}/charts/{kind}", get(get_chart))
}

#[derive(Debug, Default, Deserialize)]
struct RangeQuery {
    /// Exclusive lower bound (`YYYY/MM/DD`)
    start: Option<String>,
    /// Exclusive upper bound (`YYYY/MM/DD`)
    end: Option<String>,
}

impl RangeQuery {
    fn range(&self) -> Result<DateRange> {
        DateRange::from_bounds(self.start.as_deref(), self.end.as_deref())
    }
}

/// Load the dataset for an existing user.
async fn user_dataset(state: &AppState, user_id: i64, range: &DateRange) -> Result<Dataset> {
    if state.db.get_user(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    load_dataset(&state.db, user_id, range).await
}

// ─── Dataset ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DatasetResponse {
    pub user_id: i64,
    pub range: DateRange,
    #[serde(flatten)]
    pub dataset: Dataset,
}

async fn get_dataset(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<DatasetResponse>> {
    let range = query.range()?;
    let dataset = user_dataset(&state, user_id, &range).await?;
    Ok(Json(DatasetResponse {
        user_id,
        range,
        dataset,
    }))
}

// ─── Weekly Totals ───────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct WeeklyQuery {
    start: Option<String>,
    end: Option<String>,
    /// Numeric column to sum, `distance_km` if omitted
    field: Option<String>,
}

#[derive(Serialize)]
pub struct WeeklyResponse {
    pub user_id: i64,
    pub range: DateRange,
    pub field: String,
    pub weeks: Vec<WeeklyBucket>,
}

/// Columns that can be summed per week.
const SUMMABLE_FIELDS: [&str; 4] = [
    columns::DISTANCE_KM,
    columns::ELEVATION_M,
    columns::PERCEIVED_EFFORT,
    columns::PACE_NUMERIC,
];

async fn get_weekly(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(query): Query<WeeklyQuery>,
) -> Result<Json<WeeklyResponse>> {
    let range = DateRange::from_bounds(query.start.as_deref(), query.end.as_deref())?;
    let field = query
        .field
        .unwrap_or_else(|| columns::DISTANCE_KM.to_string());
    if !SUMMABLE_FIELDS.contains(&field.as_str()) {
        return Err(AppError::BadRequest(format!(
            "field must be one of {}",
            SUMMABLE_FIELDS.join(", ")
        )));
    }

    let dataset = user_dataset(&state, user_id, &range).await?;
    let weeks = aggregate_weekly(&dataset, columns::DATE, &field);
    Ok(Json(WeeklyResponse {
        user_id,
        range,
        field,
        weeks,
    }))
}

// ─── Charts ──────────────────────────────────────────────────

async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path((user_id, kind)): Path<(i64, String)>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<ChartSeries>> {
    let kind: ChartKind = kind.parse().map_err(AppError::BadRequest)?;
    let range = query.range()?;
    let dataset = user_dataset(&state, user_id, &range).await?;

    match build_chart(kind, &dataset) {
        Ok(series) => Ok(Json(series)),
        Err(ChartError::NoData(_)) => Err(AppError::NotFound(no_data_message(user_id))),
    }
}
