use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{Patient, Visit};
use crate::repository::{Repository, RepositoryError};

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    patients: RwLock<HashMap<String, Patient>>,
    visits: RwLock<HashMap<String, Visit>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn patient_count(&self) -> usize {
        self.patients.read().await.len()
    }

    pub async fn visit_count(&self) -> usize {
        self.visits.read().await.len()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn post_patient(&self, patient: &Patient) -> Result<(), RepositoryError> {
        let mut patients = self.patients.write().await;
        if patients.contains_key(&patient.id) {
            return Err(RepositoryError::Conflict);
        }
        patients.insert(patient.id.clone(), patient.clone());
        debug!("Stored patient {}", patient.id);
        Ok(())
    }

    async fn get_patient(&self, patient_id: &str) -> Result<Patient, RepositoryError> {
        self.patients
            .read()
            .await
            .get(patient_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn post_visit(&self, patient_id: &str, visit: &Visit) -> Result<(), RepositoryError> {
        if !self.patients.read().await.contains_key(patient_id) {
            return Err(RepositoryError::NotFound);
        }

        let mut visits = self.visits.write().await;
        if visits.contains_key(&visit.id) {
            return Err(RepositoryError::Conflict);
        }
        visits.insert(visit.id.clone(), visit.clone());
        debug!("Stored visit {} for patient {}", visit.id, patient_id);
        Ok(())
    }

    async fn get_visit(&self, visit_id: &str) -> Result<Visit, RepositoryError> {
        self.visits
            .read()
            .await
            .get(visit_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}
