use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::*;

pub fn create_medical_router(service: SharedService) -> Router {
    Router::new()
        .route("/patient/", post(create_patient))
        .route("/patient/{id}", get(get_patient))
        .route("/medical/", post(create_visit))
        .route("/medical/{id}", get(get_visit))
        .with_state(service)
}
