use axum::{routing::get, Router};

use medical_cell::handlers::SharedService;
use medical_cell::router::create_medical_router;

pub fn create_router(service: SharedService) -> Router {
    Router::new()
        .route("/", get(|| async { "Medical API is running!" }))
        .merge(create_medical_router(service))
}
