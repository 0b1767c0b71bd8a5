use std::sync::Arc;

use axum::extract::{Path, State};

use shared_models::error::AppError;
use shared_models::response::{EmptyJson, JsonUtf8};
use shared_utils::extractor::JsonBody;

use crate::models::{CreateVisitRequest, Patient, Visit};
use crate::services::MedicalService;

pub type SharedService = Arc<dyn MedicalService>;

pub async fn create_patient(
    State(service): State<SharedService>,
    JsonBody(patient): JsonBody<Patient>,
) -> Result<EmptyJson, AppError> {
    service.create_patient(patient).await?;
    Ok(EmptyJson)
}

pub async fn get_patient(
    State(service): State<SharedService>,
    Path(patient_id): Path<String>,
) -> Result<JsonUtf8<Patient>, AppError> {
    let patient = service.get_patient(&patient_id).await?;
    Ok(JsonUtf8(patient))
}

pub async fn create_visit(
    State(service): State<SharedService>,
    JsonBody(request): JsonBody<CreateVisitRequest>,
) -> Result<EmptyJson, AppError> {
    service.create_visit(&request.patient_id, request.visit).await?;
    Ok(EmptyJson)
}

pub async fn get_visit(
    State(service): State<SharedService>,
    Path(visit_id): Path<String>,
) -> Result<JsonUtf8<Visit>, AppError> {
    let visit = service.get_visit(&visit_id).await?;
    Ok(JsonUtf8(visit))
}
