use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::{DatabaseError, SupabaseClient};

use crate::models::{Patient, Slot, Visit};
use crate::repository::{Repository, RepositoryError};

const PATIENTS_TABLE: &str = "patients";
const VISITS_TABLE: &str = "visits";

/// Row of the `visits` table. The patient is stored denormalised in a
/// `jsonb` column next to its id.
#[derive(Debug, Serialize, Deserialize)]
struct VisitRow {
    id: String,
    patient_id: String,
    patient: Patient,
    #[serde(flatten)]
    slot: Slot,
    #[serde(default)]
    scheduled_at: Option<DateTime<FixedOffset>>,
}

impl From<VisitRow> for Visit {
    fn from(row: VisitRow) -> Self {
        Visit {
            id: row.id,
            patient: row.patient,
            slot: row.slot,
            scheduled_at: row.scheduled_at,
        }
    }
}

impl From<DatabaseError> for RepositoryError {
    fn from(err: DatabaseError) -> Self {
        if err.is_conflict() {
            RepositoryError::Conflict
        } else {
            RepositoryError::Backend(err.into())
        }
    }
}

pub struct SupabaseRepository {
    supabase: SupabaseClient,
    token: String,
}

impl SupabaseRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            token: config.supabase_token().to_string(),
        }
    }
}

#[async_trait]
impl Repository for SupabaseRepository {
    async fn post_patient(&self, patient: &Patient) -> Result<(), RepositoryError> {
        debug!("Inserting patient {}", patient.id);

        let row = serde_json::to_value(patient).map_err(anyhow::Error::from)?;
        self.supabase
            .insert(PATIENTS_TABLE, Some(&self.token), row)
            .await?;
        Ok(())
    }

    async fn get_patient(&self, patient_id: &str) -> Result<Patient, RepositoryError> {
        debug!("Fetching patient {}", patient_id);

        self.supabase
            .select_by_id::<Patient>(PATIENTS_TABLE, patient_id, Some(&self.token))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn post_visit(&self, patient_id: &str, visit: &Visit) -> Result<(), RepositoryError> {
        debug!("Inserting visit {} for patient {}", visit.id, patient_id);

        let row = VisitRow {
            id: visit.id.clone(),
            patient_id: patient_id.to_string(),
            patient: visit.patient.clone(),
            slot: visit.slot,
            scheduled_at: visit.scheduled_at,
        };
        let row = serde_json::to_value(&row).map_err(anyhow::Error::from)?;

        self.supabase
            .insert(VISITS_TABLE, Some(&self.token), row)
            .await?;
        Ok(())
    }

    async fn get_visit(&self, visit_id: &str) -> Result<Visit, RepositoryError> {
        debug!("Fetching visit {}", visit_id);

        self.supabase
            .select_by_id::<VisitRow>(VISITS_TABLE, visit_id, Some(&self.token))
            .await?
            .map(Visit::from)
            .ok_or(RepositoryError::NotFound)
    }
}
