// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity endpoint tests.

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

use common::{activity_body, body_json, json_request};

async fn app_with_user() -> axum::Router {
    let (app, state) = common::create_test_app();
    state
        .db
        .create_user(activity_tracker::models::UserCreate {
            name: "Test".to_string(),
            email: "test email".to_string(),
        })
        .await
        .unwrap();
    app
}

#[tokio::test]
async fn test_create_and_read_activity() {
    let app = app_with_user().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/activities",
            Some(activity_body(1, "2025/02/10", 5.59, "00:38:57")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["category"], "run");

    let response = app
        .oneshot(json_request("GET", "/activities/1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let app = app_with_user().await;
    let mut body = activity_body(1, "25 March 25", 5.0, "30mins 5secs");
    body["time_of_day"] = json!("7.30pm");
    body["category"] = json!("running");
    body["perceived_effort"] = json!(100);

    let response = app
        .oneshot(json_request("POST", "/activities", Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let data = body_json(response).await;
    assert_eq!(data["error"], "validation_error");
    let fields: Vec<&str> = data["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["date", "time_of_day", "category", "duration", "perceived_effort"]
    );
    assert_eq!(data["fields"][2]["kind"], "enum_error");
}

#[tokio::test]
async fn test_create_for_unknown_user() {
    let app = app_with_user().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/activities",
            Some(activity_body(42, "2025/02/10", 5.0, "00:30:00")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_read_missing_activity() {
    let app = app_with_user().await;

    let response = app
        .oneshot(json_request("GET", "/activities/5", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["details"], "Activity not found");
}

#[tokio::test]
async fn test_partial_update() {
    let app = app_with_user().await;
    app.clone()
        .oneshot(json_request(
            "POST",
            "/activities",
            Some(activity_body(1, "2025/02/10", 5.0, "00:30:00")),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/activities/1",
            Some(json!({"subtype": "road", "distance_km": 6.5})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["subtype"], "road");
    assert_eq!(updated["distance_km"], 6.5);
    assert_eq!(updated["date"], "2025/02/10");
    assert_eq!(updated["elevation_m"], 120);

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/activities/1",
            Some(json!({"date": 2025, "duration": 15})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_missing_activity() {
    let app = app_with_user().await;

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/activities/3",
            Some(json!({"subtype": "road"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_and_delete_activities() {
    let app = app_with_user().await;
    for date in ["2025/02/10", "2025/02/11"] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/activities",
                Some(activity_body(1, date, 5.0, "00:30:00")),
            ))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(json_request("DELETE", "/activities/1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Activity id 1 deleted"})
    );

    let response = app
        .oneshot(json_request("GET", "/activities", None))
        .await
        .unwrap();
    let data = body_json(response).await;
    let ids: Vec<&Value> = data.as_array().unwrap().iter().map(|a| &a["id"]).collect();
    assert_eq!(ids, vec![&json!(2)]);
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let app = app_with_user().await;

    let response = app
        .oneshot(json_request("POST", "/activities", Some(json!([1, 2, 3]))))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_patch_null_elevation_clears_it() {
    let app = app_with_user().await;
    app.clone()
        .oneshot(json_request(
            "POST",
            "/activities",
            Some(activity_body(1, "2025/02/10", 5.0, "00:30:00")),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/activities/1",
            Some(json!({"elevation_m": null})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["elevation_m"], Value::Null);

    let response = app
        .oneshot(json_request("GET", "/activities/1", None))
        .await
        .unwrap();
    let stored = body_json(response).await;
    assert_eq!(stored["elevation_m"], Value::Null);
    assert_eq!(stored["subtype"], "trail");
}

#[tokio::test]
async fn test_create_rejects_duration_too_long_to_count() {
    let app = app_with_user().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/activities",
            Some(activity_body(1, "2025/02/10", 5.0, "9999999999999999:00:00")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let data = body_json(response).await;
    assert_eq!(data["fields"][0]["field"], "duration");
    assert_eq!(data["fields"][0]["kind"], "range_error");
}
