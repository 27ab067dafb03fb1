#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use fleetkeep_api::config::ServerConfig;
use fleetkeep_api::router::build_app_router;
use fleetkeep_api::state::AppState;

/// Actor id sent by the request helpers unless a test says otherwise.
pub const ADMIN_ID: i64 = 1;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        event_bus_capacity: 64,
    }
}

/// Build the full application router over a fresh store, with the same
/// middleware stack as `main.rs`. The state is returned so tests can
/// inspect the store and the event journal.
pub fn build_test_app() -> (Router, AppState) {
    let config = test_config();
    let state = AppState::new(config.clone());
    let app = build_app_router(state.clone(), &config).expect("test config is valid");
    (app, state)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    actor: Option<i64>,
    body: Option<Value>,
) -> Response<Body> {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        request = request.header("x-actor-id", actor.to_string());
    }
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("request should build");
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(ADMIN_ID), Some(body)).await
}

pub async fn post_as(app: &Router, uri: &str, actor: i64, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(actor), Some(body)).await
}

pub async fn post_empty(app: &Router, uri: &str, actor: i64) -> Response<Body> {
    send(app, Method::POST, uri, Some(actor), None).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(ADMIN_ID), Some(body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(ADMIN_ID), Some(body)).await
}

/// POST and return the `data` of a 201 response.
pub async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let response = post_json(app, uri, body).await;
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, 201, "POST {uri} failed: {json}");
    json["data"].clone()
}

pub async fn create_employee(app: &Router, first_name: &str) -> Value {
    create(
        app,
        "/api/v1/employees",
        serde_json::json!({
            "firstName": first_name,
            "lastName": "Doe",
            "email": format!("{}@example.com", first_name.to_lowercase()),
            "department": "IT",
            "position": "Developer",
            "hireDate": "2020-01-01",
        }),
    )
    .await
}

pub async fn create_asset(app: &Router, name: &str) -> Value {
    create(
        app,
        "/api/v1/assets",
        serde_json::json!({"assetName": name, "assetType": "Laptop"}),
    )
    .await
}
