use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum MedicalError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("invalid appointment slot: {0}")]
    InvalidSlot(String),

    #[error("inconsistent IDs")]
    InconsistentIds,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unable to handle database request")]
    Persistence(#[source] anyhow::Error),
}

impl From<MedicalError> for AppError {
    fn from(err: MedicalError) -> Self {
        let message = err.to_string();
        match err {
            MedicalError::NotFound(_) => AppError::NotFound(message),
            MedicalError::AlreadyExists(_) | MedicalError::InconsistentIds => {
                AppError::BadRequest(message)
            }
            MedicalError::InvalidSlot(_) | MedicalError::InvalidRequest(_) => {
                AppError::ValidationError(message)
            }
            MedicalError::Persistence(source) => {
                tracing::error!("Repository failure: {:#}", source);
                AppError::Database(message)
            }
        }
    }
}
