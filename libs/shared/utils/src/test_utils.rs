use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request},
    response::Response,
};
use serde_json::{json, Value};

use shared_config::{AppConfig, StorageBackend};

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_role_key: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            supabase_service_role_key: Some("test-service-role-key".to_string()),
        }
    }
}

impl TestConfig {
    /// Points the Supabase settings at a mock server (e.g. `MockServer::uri()`).
    pub fn for_mock_server(uri: &str) -> Self {
        Self {
            supabase_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            http_addr: "127.0.0.1:0".to_string(),
            storage_backend: StorageBackend::Supabase,
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            supabase_service_role_key: self.supabase_service_role_key.clone(),
        }
    }
}

/// PostgREST rows as the `patients` / `visits` tables return them.
pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn patient_row(id: &str, name: &str, sex: &str, age: u32) -> Value {
        json!({
            "id": id,
            "name": name,
            "sex": sex,
            "age": age
        })
    }

    pub fn visit_row(id: &str, patient: Value, day: &str, time: &str) -> Value {
        json!({
            "id": id,
            "patient_id": patient["id"].clone(),
            "patient": patient,
            "day": day,
            "time": time,
            "scheduled_at": null
        })
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "message": message,
            "code": code,
            "details": null,
            "hint": null
        })
    }
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
