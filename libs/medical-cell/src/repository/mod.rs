use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use shared_config::{AppConfig, StorageBackend};

use crate::models::{Patient, Visit};

pub mod memory;
pub mod supabase;

pub use memory::InMemoryRepository;
pub use supabase::SupabaseRepository;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("id not found")]
    NotFound,

    #[error("id already exists")]
    Conflict,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Storage for patients and visits.
///
/// Writes are single-record and atomic; a failed write leaves nothing behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    async fn post_patient(&self, patient: &Patient) -> Result<(), RepositoryError>;

    async fn get_patient(&self, patient_id: &str) -> Result<Patient, RepositoryError>;

    async fn post_visit(&self, patient_id: &str, visit: &Visit) -> Result<(), RepositoryError>;

    async fn get_visit(&self, visit_id: &str) -> Result<Visit, RepositoryError>;
}

#[async_trait]
impl<R> Repository for Arc<R>
where
    R: Repository + ?Sized,
{
    async fn post_patient(&self, patient: &Patient) -> Result<(), RepositoryError> {
        (**self).post_patient(patient).await
    }

    async fn get_patient(&self, patient_id: &str) -> Result<Patient, RepositoryError> {
        (**self).get_patient(patient_id).await
    }

    async fn post_visit(&self, patient_id: &str, visit: &Visit) -> Result<(), RepositoryError> {
        (**self).post_visit(patient_id, visit).await
    }

    async fn get_visit(&self, visit_id: &str) -> Result<Visit, RepositoryError> {
        (**self).get_visit(visit_id).await
    }
}

pub fn build_repository(config: &AppConfig) -> Arc<dyn Repository> {
    match config.storage_backend {
        StorageBackend::Memory => {
            info!("Using in-memory repository");
            Arc::new(InMemoryRepository::new())
        }
        StorageBackend::Supabase => {
            info!("Using Supabase repository at {}", config.supabase_url);
            Arc::new(SupabaseRepository::new(config))
        }
    }
}
