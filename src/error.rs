// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::validation::{FieldError, ValidationReport};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failures raised by the activity data pipeline (parsing, pace, validation).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    /// Malformed duration, date, time or pace text.
    #[error("{0}")]
    Format(String),

    /// Value outside its allowed bounds.
    #[error("{0}")]
    Range(String),

    /// Value not in an enumerated set.
    #[error("{0}")]
    Enum(String),

    /// Pace requested for a non-positive distance.
    #[error("{0}")]
    Division(String),

    /// Required field absent on create.
    #[error("{0}")]
    Missing(String),
}

impl DataError {
    /// Short machine-readable name used in API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            DataError::Format(_) => "format_error",
            DataError::Range(_) => "range_error",
            DataError::Enum(_) => "enum_error",
            DataError::Division(_) => "division_error",
            DataError::Missing(_) => "missing_error",
        }
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationReport),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldErrorBody>,
}

#[derive(Serialize)]
struct FieldErrorBody {
    field: String,
    kind: &'static str,
    message: String,
}

impl From<&FieldError> for FieldErrorBody {
    fn from(err: &FieldError) -> Self {
        Self {
            field: err.field.clone(),
            kind: err.error.kind(),
            message: err.error.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields = Vec::new();
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Validation(report) => {
                fields = report.errors().iter().map(FieldErrorBody::from).collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "validation_error",
                    Some(report.to_string()),
                )
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            fields,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
