use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use alert_app::chat::ChatStore;
use alert_app::database::models::{ChatMessage, NewChatMessage, Role};
use alert_app::error::{AlertError, Result};
use alert_app::validation::{IncidentLookup, StudentDirectory};

/// In-memory stand-in for the Postgres store: incidents, student accounts,
/// and chat messages in maps behind a mutex.
#[derive(Default)]
pub struct MemoryStore {
    reporters: HashMap<String, i64>,
    students: HashSet<i64>,
    messages: Mutex<Vec<ChatMessage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with one incident whose reporter is already registered.
    pub fn with_incident(incident_id: &str, reporter: i64) -> Self {
        let mut store = Self::new();
        store.add_incident(incident_id, reporter);
        store
    }

    pub fn add_incident(&mut self, incident_id: &str, reporter: i64) {
        self.reporters.insert(incident_id.to_string(), reporter);
        self.students.insert(reporter);
    }

    pub fn add_student(&mut self, user_id: i64) {
        self.students.insert(user_id);
    }
}

#[async_trait]
impl IncidentLookup for MemoryStore {
    async fn reporter_of(&self, incident_id: &str) -> Result<Option<i64>> {
        Ok(self.reporters.get(incident_id).copied())
    }
}

#[async_trait]
impl StudentDirectory for MemoryStore {
    async fn student_exists(&self, user_id: i64) -> Result<bool> {
        Ok(self.students.contains(&user_id))
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn insert_message(&self, msg: &NewChatMessage) -> Result<ChatMessage> {
        let mut messages = self.messages.lock().unwrap();
        let stored = ChatMessage {
            message_id: messages.len() as i64 + 1,
            incident_id: msg.incident_id.clone(),
            sender_id: msg.sender_id,
            sender_role: msg.sender_role,
            receiver_id: msg.receiver_id,
            receiver_role: msg.receiver_role,
            message: msg.message.clone(),
            is_read: false,
            sent_at: Utc::now(),
        };
        messages.push(stored.clone());
        Ok(stored)
    }

    async fn message_by_id(&self, message_id: i64) -> Result<Option<ChatMessage>> {
        let messages = self.messages.lock().unwrap();
        Ok(messages
            .iter()
            .find(|m| m.message_id == message_id)
            .cloned())
    }

    async fn set_read(&self, message_id: i64) -> Result<ChatMessage> {
        let mut messages = self.messages.lock().unwrap();
        match messages.iter_mut().find(|m| m.message_id == message_id) {
            Some(message) => {
                message.is_read = true;
                Ok(message.clone())
            }
            None => Err(AlertError::NotFound(format!("chat message {}", message_id))),
        }
    }

    async fn messages_for_incident(&self, incident_id: &str) -> Result<Vec<ChatMessage>> {
        let messages = self.messages.lock().unwrap();
        Ok(messages
            .iter()
            .filter(|m| m.incident_id == incident_id)
            .cloned()
            .collect())
    }
}

pub fn admin_to_student(incident_id: &str, admin_id: i64, student_id: i64) -> NewChatMessage {
    NewChatMessage {
        incident_id: incident_id.to_string(),
        sender_id: admin_id,
        sender_role: Role::Admin,
        receiver_id: student_id,
        receiver_role: Role::Student,
        message: "are you somewhere safe?".to_string(),
    }
}

pub fn student_to_admin(incident_id: &str, student_id: i64, admin_id: i64) -> NewChatMessage {
    NewChatMessage {
        incident_id: incident_id.to_string(),
        sender_id: student_id,
        sender_role: Role::Student,
        receiver_id: admin_id,
        receiver_role: Role::Admin,
        message: "yes, in the library".to_string(),
    }
}
