//! Error envelope and caller identity handling.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, send};
use serde_json::json;
use tower::ServiceExt;

fn employee() -> serde_json::Value {
    json!({
        "firstName": "Ann",
        "lastName": "Doe",
        "email": "ann@example.com",
        "department": "IT",
        "position": "Developer",
        "hireDate": "2020-01-01",
    })
}

#[tokio::test]
async fn missing_actor_header_is_a_bad_request() {
    let (app, state) = build_test_app();

    let response = send(&app, Method::POST, "/api/v1/employees", None, Some(employee())).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("x-actor-id"));
    assert!(state.store.snapshot().unwrap().employees.is_empty());
}

#[tokio::test]
async fn non_positive_actor_id_is_rejected() {
    let (app, _state) = build_test_app();

    let response = send(&app, Method::POST, "/api/v1/employees", Some(0), Some(employee())).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_actor_role_is_rejected() {
    let (app, _state) = build_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/employees")
        .header("x-actor-id", "1")
        .header("x-actor-role", "Overlord")
        .header("content-type", "application/json")
        .body(Body::from(employee().to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_body_lists_every_violation() {
    let (app, _state) = build_test_app();
    let body = json!({"firstName": "", "lastName": "Doe", "email": "nope"});

    let response = send(&app, Method::POST, "/api/v1/employees", Some(1), Some(body)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = json["violations"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v["field"].as_str())
        .collect();
    for field in ["firstName", "email", "department", "position", "hireDate"] {
        assert!(fields.contains(&field), "missing {field} in {fields:?}");
    }
}
