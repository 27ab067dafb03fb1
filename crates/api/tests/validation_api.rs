//! Schema dry-run endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, patch_json, post_json};
use serde_json::json;

#[tokio::test]
async fn valid_employee_echoes_the_typed_input() {
    let (app, state) = build_test_app();
    let body = json!({
        "firstName": "John",
        "lastName": "Doe",
        "email": "john.doe@example.com",
        "department": "IT",
        "position": "Developer",
        "hireDate": "2020-01-15",
    });

    let response = post_json(&app, "/api/v1/validate/employee", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["entity"], "Employee");
    assert_eq!(json["data"]["value"]["email"], "john.doe@example.com");
    assert!(state.store.snapshot().unwrap().employees.is_empty());
}

#[tokio::test]
async fn bad_email_is_a_single_violation() {
    let (app, _state) = build_test_app();
    let body = json!({
        "firstName": "John",
        "lastName": "Doe",
        "email": "not-an-email",
        "department": "IT",
        "position": "Developer",
        "hireDate": "2020-01-15",
    });

    let response = post_json(&app, "/api/v1/validate/Employee", body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let violations = json["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["field"], "email");
}

#[tokio::test]
async fn buffer_stock_levels_report_both_violations() {
    let (app, _state) = build_test_app();
    let body = json!({
        "itemName": "Toner",
        "itemType": "Consumable",
        "quantityAvailable": 100,
        "minimumStockLevel": 100,
        "maximumStockLevel": 50,
        "managedBy": 1,
    });

    let response = post_json(&app, "/api/v1/validate/buffer-stock", body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["violations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn partial_update_accepts_a_single_field() {
    let (app, _state) = build_test_app();

    let response = patch_json(&app, "/api/v1/validate/asset", json!({"location": "HQ"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["value"]["location"], "HQ");
}

#[tokio::test]
async fn unknown_entity_is_a_bad_request() {
    let (app, _state) = build_test_app();

    let response = post_json(&app, "/api/v1/validate/spaceship", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
