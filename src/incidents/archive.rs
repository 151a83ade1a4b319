use crate::database::models::ArchivedIncident;
use crate::database::queries::Queries;
use crate::database::Database;
use crate::error::Result;

/// Archive of resolved incidents. Archiving snapshots the incident row and
/// deletes the live one; the incident's chat history is dropped by the
/// cascade on the chat table.
pub struct ArchiveService {
    db: Database,
}

impl ArchiveService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn archive(&self, incident_id: &str, archived_by: i64) -> Result<ArchivedIncident> {
        self.db.archive_incident(incident_id, archived_by).await
    }

    pub async fn list(&self) -> Result<Vec<ArchivedIncident>> {
        Queries::archived_incidents(self.db.pool()).await
    }
}
