use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::DateTime;
use serde_json::json;
use tower::ServiceExt;

use medical_cell::{create_medical_router, InMemoryRepository, LoggingMiddleware, MedicalServiceImpl};
use shared_models::response::JSON_UTF8;
use shared_utils::test_utils::{body_bytes, body_json, empty_request, json_request};

fn create_test_app() -> Router {
    let service = MedicalServiceImpl::new(InMemoryRepository::new());
    create_medical_router(Arc::new(LoggingMiddleware::new(service)))
}

async fn seed_alice(app: &Router) {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/patient/",
            json!({ "id": "p1", "name": "Alice", "sex": "F", "age": 30 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_get_patient() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/patient/",
            json!({ "id": "p1", "name": "Alice", "sex": "F", "age": 30 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], JSON_UTF8);
    assert!(body_bytes(response).await.is_empty());

    let response = app
        .oneshot(empty_request(Method::GET, "/patient/p1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], JSON_UTF8);
    assert_eq!(
        body_json(response).await,
        json!({ "id": "p1", "name": "Alice", "sex": "F", "age": 30 })
    );
}

#[tokio::test]
async fn test_duplicate_patient_is_bad_request() {
    let app = create_test_app();
    seed_alice(&app).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/patient/",
            json!({ "id": "p1", "name": "Mallory", "sex": "M", "age": 41 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[CONTENT_TYPE], JSON_UTF8);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "patient p1 already exists" })
    );
}

#[tokio::test]
async fn test_missing_patient_is_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(empty_request(Method::GET, "/patient/nobody"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "patient nobody not found" })
    );
}

#[tokio::test]
async fn test_book_and_read_visit() {
    let app = create_test_app();
    seed_alice(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/medical/",
            json!({ "id": "v1", "patient_id": "p1", "day": "Monday", "time": "08:15" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request(Method::GET, "/medical/v1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], JSON_UTF8);
    assert_eq!(
        body_json(response).await,
        json!({
            "id": "v1",
            "patient": { "id": "p1", "name": "Alice", "sex": "F", "age": 30 },
            "day": "Monday",
            "time": "08:15"
        })
    );
}

#[tokio::test]
async fn test_book_visit_with_timestamp() {
    let app = create_test_app();
    seed_alice(&app).await;

    // 2024-01-06 is a Saturday.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/medical/",
            json!({ "id": "v1", "patient_id": "p1", "schedule": "2024-01-06T09:05:00Z" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request(Method::GET, "/medical/v1"))
        .await
        .unwrap();
    let body = body_json(response).await;

    assert_eq!(body["day"], "Saturday");
    assert_eq!(body["time"], "09:05");
    let scheduled_at = DateTime::parse_from_rfc3339(body["scheduled_at"].as_str().unwrap()).unwrap();
    assert_eq!(scheduled_at, DateTime::parse_from_rfc3339("2024-01-06T09:05:00Z").unwrap());
}

#[tokio::test]
async fn test_closed_slot_is_bad_request() {
    let app = create_test_app();
    seed_alice(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/medical/",
            json!({ "id": "v2", "patient_id": "p1", "day": "Monday", "time": "11:00" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("invalid appointment slot"));

    let response = app
        .oneshot(empty_request(Method::GET, "/medical/v2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_visit_for_unknown_patient_is_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/medical/",
            json!({ "id": "v1", "patient_id": "ghost", "day": "Monday", "time": "08:15" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "patient ghost not found" })
    );
}

#[tokio::test]
async fn test_visit_without_schedule_is_not_found() {
    let app = create_test_app();
    seed_alice(&app).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/medical/",
            json!({ "id": "v1", "patient_id": "p1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_visit_with_zero_schedule_is_not_found() {
    let app = create_test_app();
    seed_alice(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/medical/",
            json!({ "id": "v1", "patient_id": "p1", "schedule": "0001-01-01T00:00:00Z" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "visit schedule not found" })
    );

    let response = app
        .oneshot(empty_request(Method::GET, "/medical/v1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = create_test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/patient/")
        .body(Body::from("{\"id\": \"p1\", \"age\": \"thirty\""))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[CONTENT_TYPE], JSON_UTF8);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("invalid JSON body"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(empty_request(Method::GET, "/appointments"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
