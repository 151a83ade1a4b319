use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AlertError;

/// Role tag carried by each chat participant. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }

    pub fn parse(tag: &str) -> Result<Self, AlertError> {
        match tag {
            "admin" => Ok(Role::Admin),
            "student" => Ok(Role::Student),
            other => Err(AlertError::Database(format!("invalid role tag: {}", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentAccount {
    pub user_id: i64,
    pub student_id: String,
    pub student_user: String,
    #[serde(skip_serializing)]
    pub student_pass: String,
    pub student_email: String,
    pub full_name: String,
    pub student_yearlvl: Option<String>,
    pub student_cnum: Option<String>,
    pub student_emergencycontact: Option<String>,
    pub student_contactperson: Option<String>,
    pub student_medinfo: Option<String>,
    pub student_address: Option<String>,
    pub student_profile: Option<String>,
    pub student_status: String,
    pub student_created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStudentAccount {
    pub student_id: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    pub year_level: Option<String>,
    pub contact_number: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminAccount {
    pub user_id: i64,
    pub admin_user: String,
    #[serde(skip_serializing)]
    pub admin_pass: String,
    pub full_name: String,
    pub admin_email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAdminAccount {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
}

/// Contact and medical details a student can fill in after registration.
/// `None` fields are left untouched by an update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmergencyInfoUpdate {
    pub emergency_contact: Option<String>,
    pub contact_person: Option<String>,
    pub medical_info: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Incident {
    pub incident_id: String,
    pub reporter_id: i64,
    pub incident_type: String,
    pub description: String,
    pub location: Option<String>,
    pub status: String,
    pub reported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewIncident {
    pub reporter_id: i64,
    pub incident_type: String,
    pub description: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub message_id: i64,
    pub incident_id: String,
    pub sender_id: i64,
    pub sender_role: Role,
    pub receiver_id: i64,
    pub receiver_role: Role,
    pub message: String,
    pub is_read: bool,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Write-candidate view of a stored message. Updates must pass the same
    /// validation as the original insert, so they go back through this shape.
    pub fn as_candidate(&self) -> NewChatMessage {
        NewChatMessage {
            incident_id: self.incident_id.clone(),
            sender_id: self.sender_id,
            sender_role: self.sender_role,
            receiver_id: self.receiver_id,
            receiver_role: self.receiver_role,
            message: self.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChatMessage {
    pub incident_id: String,
    pub sender_id: i64,
    pub sender_role: Role,
    pub receiver_id: i64,
    pub receiver_role: Role,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchivedIncident {
    pub archive_id: i64,
    pub incident_id: String,
    pub reporter_id: i64,
    pub incident_type: String,
    pub description: String,
    pub location: Option<String>,
    pub reported_at: DateTime<Utc>,
    pub archived_by: i64,
    pub archived_at: DateTime<Utc>,
}
