use tracing::{info, warn};

use crate::chat::ChatStore;
use crate::database::models::{ChatMessage, NewChatMessage};
use crate::error::{AlertError, Result};
use crate::validation::{check_reporter_identity, IncidentLookup, StudentDirectory};

/// Incident-scoped chat between admins and students. Every write goes
/// through the reporter guard before it touches the store.
pub struct ChatService<S> {
    store: S,
}

impl<S> ChatService<S>
where
    S: ChatStore + IncidentLookup + StudentDirectory + Send + Sync,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn send_message(&self, candidate: NewChatMessage) -> Result<ChatMessage> {
        if let Err(err) = check_reporter_identity(&candidate, &self.store, &self.store).await {
            warn!(
                "rejected chat message for incident {}: {}",
                candidate.incident_id, err
            );
            return Err(err);
        }

        let stored = self.store.insert_message(&candidate).await?;
        info!(
            "stored chat message {} for incident {}",
            stored.message_id, stored.incident_id
        );
        Ok(stored)
    }

    /// Flip the read flag. The read flag is the only mutable field on a chat
    /// message, but updates revalidate the record the same way inserts do.
    pub async fn mark_read(&self, message_id: i64) -> Result<ChatMessage> {
        let existing = self
            .store
            .message_by_id(message_id)
            .await?
            .ok_or_else(|| AlertError::NotFound(format!("chat message {}", message_id)))?;

        check_reporter_identity(&existing.as_candidate(), &self.store, &self.store).await?;

        self.store.set_read(message_id).await
    }

    pub async fn conversation(&self, incident_id: &str) -> Result<Vec<ChatMessage>> {
        self.store.messages_for_incident(incident_id).await
    }
}
