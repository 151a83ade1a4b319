pub mod service;

pub use service::ChatService;

use async_trait::async_trait;

use crate::database::models::{ChatMessage, NewChatMessage};
use crate::database::queries::Queries;
use crate::database::Database;
use crate::error::Result;

/// Storage surface the chat service needs. Kept as a trait so the send and
/// mark-read paths can be exercised against an in-memory store.
#[async_trait]
pub trait ChatStore {
    async fn insert_message(&self, msg: &NewChatMessage) -> Result<ChatMessage>;
    async fn message_by_id(&self, message_id: i64) -> Result<Option<ChatMessage>>;
    async fn set_read(&self, message_id: i64) -> Result<ChatMessage>;
    async fn messages_for_incident(&self, incident_id: &str) -> Result<Vec<ChatMessage>>;
}

#[async_trait]
impl ChatStore for Database {
    async fn insert_message(&self, msg: &NewChatMessage) -> Result<ChatMessage> {
        self.insert_chat_message(msg).await
    }

    async fn message_by_id(&self, message_id: i64) -> Result<Option<ChatMessage>> {
        Queries::chat_message(self.pool(), message_id).await
    }

    async fn set_read(&self, message_id: i64) -> Result<ChatMessage> {
        self.set_message_read(message_id).await
    }

    async fn messages_for_incident(&self, incident_id: &str) -> Result<Vec<ChatMessage>> {
        Queries::messages_for_incident(self.pool(), incident_id).await
    }
}
