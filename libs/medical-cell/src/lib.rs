pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;

pub use error::MedicalError;
pub use models::*;
pub use repository::{InMemoryRepository, Repository, RepositoryError, SupabaseRepository};
pub use router::create_medical_router;
pub use services::{build_service, LoggingMiddleware, MedicalService, MedicalServiceImpl};
