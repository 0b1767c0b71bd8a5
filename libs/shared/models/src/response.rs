use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// JSON body sent with an explicit `charset=utf-8` content type.
///
/// `axum::Json` only sets `application/json`; clients of this API expect
/// the charset parameter on every body, including empty ones.
#[derive(Debug, Clone)]
pub struct JsonUtf8<T>(pub T);

impl<T> IntoResponse for JsonUtf8<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => with_json_content_type((StatusCode::OK, bytes).into_response()),
            Err(e) => {
                tracing::error!("Failed to serialize response body: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// 200 with no body, tagged as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyJson;

impl IntoResponse for EmptyJson {
    fn into_response(self) -> Response {
        with_json_content_type(StatusCode::OK.into_response())
    }
}

fn with_json_content_type(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    response
}
