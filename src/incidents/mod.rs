pub mod archive;

pub use archive::ArchiveService;

use tracing::info;
use uuid::Uuid;

use crate::database::models::{Incident, NewIncident};
use crate::database::queries::Queries;
use crate::database::Database;
use crate::error::Result;

/// Incident ids are `ICD_`-prefixed so they read well in chat transcripts
/// and on the admin dashboard.
pub fn new_incident_id() -> String {
    format!("ICD_{}", Uuid::new_v4().simple())
}

/// Incident lifecycle: reported by a student, worked by admins over chat,
/// resolved, then archived off the live tables.
pub struct IncidentService {
    db: Database,
}

impl IncidentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn report(&self, new: NewIncident) -> Result<Incident> {
        let incident_id = new_incident_id();
        let incident = self.db.create_incident(&incident_id, &new).await?;
        info!(
            "incident {} reported by student {}",
            incident.incident_id, incident.reporter_id
        );
        Ok(incident)
    }

    pub async fn resolve(&self, incident_id: &str) -> Result<Incident> {
        self.db.set_incident_status(incident_id, "resolved").await
    }

    pub async fn get(&self, incident_id: &str) -> Result<Option<Incident>> {
        Queries::incident(self.db.pool(), incident_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn incident_ids_are_prefixed_and_unique() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let id = new_incident_id();
            assert!(id.starts_with("ICD_"));
            assert!(id.len() > 4);
            assert!(seen.insert(id));
        }
    }
}
