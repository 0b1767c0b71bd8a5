use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::MedicalError;
use crate::models::{Patient, ScheduleVisitRequest, Visit};
use crate::services::medical::MedicalService;

/// Wraps a `MedicalService` and emits one event per call with the method,
/// the id it was called with, elapsed time and any error.
pub struct LoggingMiddleware<S> {
    next: S,
}

impl<S> LoggingMiddleware<S>
where
    S: MedicalService,
{
    pub fn new(next: S) -> Self {
        Self { next }
    }
}

fn log_call<T>(method: &str, id: &str, begin: Instant, result: &Result<T, MedicalError>) {
    let took_ms = begin.elapsed().as_secs_f64() * 1000.0;
    match result {
        Ok(_) => info!(method, id, took_ms, "medical service call"),
        Err(e) => warn!(method, id, took_ms, error = %e, "medical service call failed"),
    }
}

#[async_trait]
impl<S> MedicalService for LoggingMiddleware<S>
where
    S: MedicalService,
{
    async fn create_patient(&self, patient: Patient) -> Result<(), MedicalError> {
        let begin = Instant::now();
        let id = patient.id.clone();
        let result = self.next.create_patient(patient).await;
        log_call("create_patient", &id, begin, &result);
        result
    }

    async fn get_patient(&self, patient_id: &str) -> Result<Patient, MedicalError> {
        let begin = Instant::now();
        let result = self.next.get_patient(patient_id).await;
        log_call("get_patient", patient_id, begin, &result);
        result
    }

    async fn create_visit(
        &self,
        patient_id: &str,
        request: ScheduleVisitRequest,
    ) -> Result<(), MedicalError> {
        let begin = Instant::now();
        let id = request.id.clone();
        let result = self.next.create_visit(patient_id, request).await;
        log_call("create_visit", &id, begin, &result);
        result
    }

    async fn get_visit(&self, visit_id: &str) -> Result<Visit, MedicalError> {
        let begin = Instant::now();
        let result = self.next.get_visit(visit_id).await;
        log_call("get_visit", visit_id, begin, &result);
        result
    }
}
