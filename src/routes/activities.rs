// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity CRUD routes.
//!
//! Bodies are taken as raw JSON objects and checked field by field, so a
//! client sees every problem with a record in one 422 response.

use crate::error::{AppError, Result};
use crate::models::Activity;
use crate::routes::{MessageResponse, Pagination};
use crate::services::{validate_activity_create, validate_activity_update};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route(
            "/activities/{id}",
            get(get_activity).patch(update_activity).delete(delete_activity),
        )
}

fn activity_not_found() -> AppError {
    AppError::NotFound("Activity not found".to_string())
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Activity>> {
    let activity = validate_activity_create(&body)?;
    let activity = state.db.create_activity(activity).await?;
    Ok(Json(activity))
}

async fn list_activities(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Activity>>> {
    let (offset, limit) = page.resolve();
    Ok(Json(state.db.list_activities(offset, limit).await?))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Activity>> {
    let activity = state
        .db
        .get_activity(id)
        .await?
        .ok_or_else(activity_not_found)?;
    Ok(Json(activity))
}

/// Update the supplied fields; anything left out keeps its value.
async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Activity>> {
    let update = validate_activity_update(&body)?;
    let activity = state
        .db
        .update_activity(id, update)
        .await?
        .ok_or_else(activity_not_found)?;
    tracing::info!(id, "Updated activity");
    Ok(Json(activity))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    if !state.db.delete_activity(id).await? {
        return Err(activity_not_found());
    }
    tracing::info!(id, "Deleted activity");
    Ok(Json(MessageResponse {
        message: format!("Activity id {} deleted", id),
    }))
}
