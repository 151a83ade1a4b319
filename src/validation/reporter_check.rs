//! Incident-Reporter Guard
//!
//! Enforces the chat participation invariant: a participant tagged as a
//! student on a chat message must be the student who reported the referenced
//! incident. Admin participants are not identity-checked here; the foreign
//! keys on the chat table are all that covers them.
//!
//! The check runs on every chat write (insert and read-flag update alike),
//! holds no state between calls, and never mutates anything it reads.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::database::models::{NewChatMessage, Role};
use crate::error::Result;

/// Which side of the message a violation was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Sender,
    Receiver,
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Sender => write!(f, "sender"),
            Participant::Receiver => write!(f, "receiver"),
        }
    }
}

/// A violation of the reporter invariant. Fatal to the write that raised it:
/// nothing is persisted and the caller sees the reason unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    #[error("incident {incident_id} does not exist or has no recorded reporter")]
    UnknownIncident { incident_id: String },

    #[error("{participant} {user_id} is not a registered student account")]
    UnknownStudent { participant: Participant, user_id: i64 },

    #[error("{participant} {user_id} is not the reporter of incident {incident_id}: expected student {expected}")]
    RoleMismatch {
        participant: Participant,
        user_id: i64,
        incident_id: String,
        expected: i64,
    },
}

/// Read-only incident lookup consumed by the guard.
#[async_trait]
pub trait IncidentLookup {
    /// Reporter user id recorded on the incident, if the incident resolves.
    async fn reporter_of(&self, incident_id: &str) -> Result<Option<i64>>;
}

/// Read-only student-account lookup consumed by the guard.
#[async_trait]
pub trait StudentDirectory {
    async fn student_exists(&self, user_id: i64) -> Result<bool>;
}

/// Validate a candidate chat message against the reporter invariant.
///
/// Checks run in a fixed order: the incident must resolve to a reporter,
/// then the sender, then the receiver. On success the write may proceed
/// unchanged; the guard is a gate, not a transform.
pub async fn check_reporter_identity<I, S>(
    candidate: &NewChatMessage,
    incidents: &I,
    students: &S,
) -> Result<()>
where
    I: IncidentLookup + Sync + ?Sized,
    S: StudentDirectory + Sync + ?Sized,
{
    let reporter = incidents
        .reporter_of(&candidate.incident_id)
        .await?
        .ok_or_else(|| GuardError::UnknownIncident {
            incident_id: candidate.incident_id.clone(),
        })?;

    check_participant(
        Participant::Sender,
        candidate.sender_id,
        candidate.sender_role,
        &candidate.incident_id,
        reporter,
        students,
    )
    .await?;

    check_participant(
        Participant::Receiver,
        candidate.receiver_id,
        candidate.receiver_role,
        &candidate.incident_id,
        reporter,
        students,
    )
    .await?;

    Ok(())
}

async fn check_participant<S>(
    participant: Participant,
    user_id: i64,
    role: Role,
    incident_id: &str,
    reporter: i64,
    students: &S,
) -> Result<()>
where
    S: StudentDirectory + Sync + ?Sized,
{
    // Admin identities are not validated here.
    if role != Role::Student {
        return Ok(());
    }

    if !students.student_exists(user_id).await? {
        return Err(GuardError::UnknownStudent {
            participant,
            user_id,
        }
        .into());
    }

    if user_id != reporter {
        return Err(GuardError::RoleMismatch {
            participant,
            user_id,
            incident_id: incident_id.to_string(),
            expected: reporter,
        }
        .into());
    }

    Ok(())
}
