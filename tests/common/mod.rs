// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_tracker::config::Config;
use activity_tracker::routes::create_router;
use activity_tracker::AppState;
use axum::{
    body::Body,
    http::{header, Request, Response},
};
use serde_json::Value;
use std::sync::Arc;

/// Create a test app over a private in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::open(Config::default()).expect("in-memory database"));
    (create_router(state.clone()), state)
}

/// Build a request with an optional JSON body.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// A complete, valid activity body for `user_id`.
#[allow(dead_code)]
pub fn activity_body(user_id: i64, date: &str, distance_km: f64, duration: &str) -> Value {
    serde_json::json!({
        "user_id": user_id,
        "date": date,
        "time_of_day": "07:30",
        "category": "run",
        "subtype": "trail",
        "duration": duration,
        "distance_km": distance_km,
        "perceived_effort": 6,
        "elevation_m": 120
    })
}
