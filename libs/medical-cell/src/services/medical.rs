use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::MedicalError;
use crate::models::{Patient, ScheduleVisitRequest, Visit};
use crate::repository::{Repository, RepositoryError};
use crate::services::schedule::check_schedule;

#[async_trait]
pub trait MedicalService: Send + Sync {
    async fn create_patient(&self, patient: Patient) -> Result<(), MedicalError>;

    async fn get_patient(&self, patient_id: &str) -> Result<Patient, MedicalError>;

    async fn create_visit(
        &self,
        patient_id: &str,
        request: ScheduleVisitRequest,
    ) -> Result<(), MedicalError>;

    async fn get_visit(&self, visit_id: &str) -> Result<Visit, MedicalError>;
}

/// Patients and visits over a `Repository`.
///
/// One read/write lock covers every operation for its whole duration:
/// creates hold it exclusively across lookup, validation and the write, so
/// two bookings can never interleave their check-then-write. Reads share it.
/// This serialises all writes on an instance; nothing is coordinated across
/// processes.
pub struct MedicalServiceImpl<R> {
    repository: R,
    lock: RwLock<()>,
}

impl<R> MedicalServiceImpl<R>
where
    R: Repository,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            lock: RwLock::new(()),
        }
    }

    async fn find_patient(&self, patient_id: &str) -> Result<Patient, MedicalError> {
        match self.repository.get_patient(patient_id).await {
            Ok(patient) => Ok(patient),
            Err(RepositoryError::NotFound) => {
                Err(MedicalError::NotFound(format!("patient {}", patient_id)))
            }
            Err(e) => Err(persistence(e)),
        }
    }
}

fn persistence(err: RepositoryError) -> MedicalError {
    MedicalError::Persistence(anyhow::Error::new(err))
}

fn require_id(kind: &str, id: &str) -> Result<(), MedicalError> {
    if id.trim().is_empty() {
        return Err(MedicalError::InvalidRequest(format!("{} id must not be empty", kind)));
    }
    Ok(())
}

#[async_trait]
impl<R> MedicalService for MedicalServiceImpl<R>
where
    R: Repository,
{
    async fn create_patient(&self, patient: Patient) -> Result<(), MedicalError> {
        patient.validate()?;
        let _guard = self.lock.write().await;

        match self.repository.get_patient(&patient.id).await {
            Ok(_) => return Err(MedicalError::AlreadyExists(format!("patient {}", patient.id))),
            Err(RepositoryError::NotFound) => {}
            Err(e) => return Err(persistence(e)),
        }

        match self.repository.post_patient(&patient).await {
            Ok(()) => {
                debug!("Patient {} created", patient.id);
                Ok(())
            }
            Err(RepositoryError::Conflict) => {
                Err(MedicalError::AlreadyExists(format!("patient {}", patient.id)))
            }
            Err(e) => Err(persistence(e)),
        }
    }

    async fn get_patient(&self, patient_id: &str) -> Result<Patient, MedicalError> {
        let _guard = self.lock.read().await;
        self.find_patient(patient_id).await
    }

    async fn create_visit(
        &self,
        patient_id: &str,
        request: ScheduleVisitRequest,
    ) -> Result<(), MedicalError> {
        require_id("patient", patient_id)?;
        require_id("visit", &request.id)?;
        let _guard = self.lock.write().await;

        let patient = self.find_patient(patient_id).await?;
        let slot = check_schedule(request.requested_slot()?)?;

        let visit = Visit {
            id: request.id,
            patient,
            slot,
            scheduled_at: request.schedule,
        };

        match self.repository.post_visit(patient_id, &visit).await {
            Ok(()) => {
                debug!("Visit {} booked for patient {} on {}", visit.id, patient_id, visit.slot);
                Ok(())
            }
            Err(RepositoryError::Conflict) => {
                Err(MedicalError::AlreadyExists(format!("visit {}", visit.id)))
            }
            Err(RepositoryError::NotFound) => {
                Err(MedicalError::NotFound(format!("patient {}", patient_id)))
            }
            Err(e) => Err(persistence(e)),
        }
    }

    async fn get_visit(&self, visit_id: &str) -> Result<Visit, MedicalError> {
        let _guard = self.lock.read().await;

        match self.repository.get_visit(visit_id).await {
            Ok(visit) => Ok(visit),
            Err(RepositoryError::NotFound) => {
                Err(MedicalError::NotFound(format!("visit {}", visit_id)))
            }
            Err(e) => Err(persistence(e)),
        }
    }
}
