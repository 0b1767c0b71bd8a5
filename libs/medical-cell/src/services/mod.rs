pub mod logging;
pub mod medical;
pub mod schedule;

use std::sync::Arc;

use shared_config::AppConfig;

use crate::repository::build_repository;

pub use logging::LoggingMiddleware;
pub use medical::{MedicalService, MedicalServiceImpl};
pub use schedule::{allowed_hours, check_schedule, is_valid_slot};

/// Service stack for the configured storage backend, wrapped in call logging.
pub fn build_service(config: &AppConfig) -> Arc<dyn MedicalService> {
    let repository = build_repository(config);
    Arc::new(LoggingMiddleware::new(MedicalServiceImpl::new(repository)))
}
