// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User CRUD routes.

use crate::error::{AppError, Result};
use crate::models::{User, UserCreate, UserPublic, UserUpdate};
use crate::routes::{MessageResponse, Pagination};
use crate::services::ValidationReport;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

/// Create a user. The response includes the email.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserCreate>,
) -> Result<Json<User>> {
    payload.validate().map_err(ValidationReport::from)?;
    let user = state.db.create_user(payload).await?;
    Ok(Json(user))
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<UserPublic>>> {
    let (offset, limit) = page.resolve();
    let users = state.db.list_users(offset, limit).await?;
    Ok(Json(users.into_iter().map(UserPublic::from).collect()))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserPublic>> {
    let user = state.db.get_user(user_id).await?.ok_or_else(user_not_found)?;
    Ok(Json(user.into()))
}

/// Update the supplied fields; anything left out keeps its value.
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> Result<Json<UserPublic>> {
    payload.validate().map_err(ValidationReport::from)?;
    let user = state
        .db
        .update_user(user_id, payload)
        .await?
        .ok_or_else(user_not_found)?;
    tracing::info!(user_id, "Updated user");
    Ok(Json(user.into()))
}

/// Delete a user together with their activities.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    if !state.db.delete_user(user_id).await? {
        return Err(user_not_found());
    }
    Ok(Json(MessageResponse {
        message: format!("User_id {} deleted", user_id),
    }))
}
