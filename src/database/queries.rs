use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::database::models::*;
use crate::error::Result;

/// Read-side queries against the live tables.
pub struct Queries;

impl Queries {
    pub async fn reporter_of(pool: &PgPool, incident_id: &str) -> Result<Option<i64>> {
        let row = sqlx::query("SELECT reporter_id FROM incident_reports WHERE incident_id = $1")
            .bind(incident_id)
            .fetch_optional(pool)
            .await?;

        // A row with a null reporter counts as unresolvable, same as no row.
        let reporter = match row {
            Some(row) => row.try_get::<Option<i64>, _>("reporter_id")?,
            None => None,
        };
        Ok(reporter)
    }

    pub async fn student_exists(pool: &PgPool, user_id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT 1 AS present FROM accounts_student WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    pub async fn incident(pool: &PgPool, incident_id: &str) -> Result<Option<Incident>> {
        let row = sqlx::query(
            r#"
            SELECT incident_id, reporter_id, incident_type, description, location, status, reported_at
            FROM incident_reports
            WHERE incident_id = $1
            "#,
        )
        .bind(incident_id)
        .fetch_optional(pool)
        .await?;

        row.map(|row| incident_from_row(&row)).transpose()
    }

    pub async fn chat_message(pool: &PgPool, message_id: i64) -> Result<Option<ChatMessage>> {
        let row = sqlx::query(
            r#"
            SELECT message_id, incident_id, sender_id, sender_role, receiver_id, receiver_role,
                   message, is_read, sent_at
            FROM chat_messages
            WHERE message_id = $1
            "#,
        )
        .bind(message_id)
        .fetch_optional(pool)
        .await?;

        row.map(|row| chat_message_from_row(&row)).transpose()
    }

    pub async fn messages_for_incident(
        pool: &PgPool,
        incident_id: &str,
    ) -> Result<Vec<ChatMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT message_id, incident_id, sender_id, sender_role, receiver_id, receiver_role,
                   message, is_read, sent_at
            FROM chat_messages
            WHERE incident_id = $1
            ORDER BY sent_at, message_id
            "#,
        )
        .bind(incident_id)
        .fetch_all(pool)
        .await?;

        rows.iter().map(chat_message_from_row).collect()
    }

    pub async fn student(pool: &PgPool, user_id: i64) -> Result<Option<StudentAccount>> {
        let row = sqlx::query(STUDENT_COLUMNS_WHERE_ID)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        row.map(|row| student_from_row(&row)).transpose()
    }

    pub async fn student_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<StudentAccount>> {
        let row = sqlx::query(STUDENT_COLUMNS_WHERE_USER)
            .bind(username)
            .fetch_optional(pool)
            .await?;

        row.map(|row| student_from_row(&row)).transpose()
    }

    pub async fn archived_incidents(pool: &PgPool) -> Result<Vec<ArchivedIncident>> {
        let rows = sqlx::query(
            r#"
            SELECT archive_id, incident_id, reporter_id, incident_type, description, location,
                   reported_at, archived_by, archived_at
            FROM incident_archive
            ORDER BY archived_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        rows.iter().map(archived_from_row).collect()
    }
}

const STUDENT_COLUMNS_WHERE_ID: &str = r#"
    SELECT user_id, student_id, student_user, student_pass, student_email, full_name,
           student_yearlvl, student_cnum, student_emergencycontact, student_contactperson,
           student_medinfo, student_address, student_profile, student_status, student_created_at
    FROM accounts_student
    WHERE user_id = $1
"#;

const STUDENT_COLUMNS_WHERE_USER: &str = r#"
    SELECT user_id, student_id, student_user, student_pass, student_email, full_name,
           student_yearlvl, student_cnum, student_emergencycontact, student_contactperson,
           student_medinfo, student_address, student_profile, student_status, student_created_at
    FROM accounts_student
    WHERE student_user = $1
"#;

pub(crate) fn chat_message_from_row(row: &PgRow) -> Result<ChatMessage> {
    Ok(ChatMessage {
        message_id: row.try_get("message_id")?,
        incident_id: row.try_get("incident_id")?,
        sender_id: row.try_get("sender_id")?,
        sender_role: Role::parse(&row.try_get::<String, _>("sender_role")?)?,
        receiver_id: row.try_get("receiver_id")?,
        receiver_role: Role::parse(&row.try_get::<String, _>("receiver_role")?)?,
        message: row.try_get("message")?,
        is_read: row.try_get("is_read")?,
        sent_at: row.try_get("sent_at")?,
    })
}

pub(crate) fn incident_from_row(row: &PgRow) -> Result<Incident> {
    Ok(Incident {
        incident_id: row.try_get("incident_id")?,
        reporter_id: row.try_get("reporter_id")?,
        incident_type: row.try_get("incident_type")?,
        description: row.try_get("description")?,
        location: row.try_get("location")?,
        status: row.try_get("status")?,
        reported_at: row.try_get("reported_at")?,
    })
}

pub(crate) fn student_from_row(row: &PgRow) -> Result<StudentAccount> {
    Ok(StudentAccount {
        user_id: row.try_get("user_id")?,
        student_id: row.try_get("student_id")?,
        student_user: row.try_get("student_user")?,
        student_pass: row.try_get("student_pass")?,
        student_email: row.try_get("student_email")?,
        full_name: row.try_get("full_name")?,
        student_yearlvl: row.try_get("student_yearlvl")?,
        student_cnum: row.try_get("student_cnum")?,
        student_emergencycontact: row.try_get("student_emergencycontact")?,
        student_contactperson: row.try_get("student_contactperson")?,
        student_medinfo: row.try_get("student_medinfo")?,
        student_address: row.try_get("student_address")?,
        student_profile: row.try_get("student_profile")?,
        student_status: row.try_get("student_status")?,
        student_created_at: row.try_get("student_created_at")?,
    })
}

pub(crate) fn admin_from_row(row: &PgRow) -> Result<AdminAccount> {
    Ok(AdminAccount {
        user_id: row.try_get("user_id")?,
        admin_user: row.try_get("admin_user")?,
        admin_pass: row.try_get("admin_pass")?,
        full_name: row.try_get("full_name")?,
        admin_email: row.try_get("admin_email")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn archived_from_row(row: &PgRow) -> Result<ArchivedIncident> {
    Ok(ArchivedIncident {
        archive_id: row.try_get("archive_id")?,
        incident_id: row.try_get("incident_id")?,
        reporter_id: row.try_get("reporter_id")?,
        incident_type: row.try_get("incident_type")?,
        description: row.try_get("description")?,
        location: row.try_get("location")?,
        reported_at: row.try_get("reported_at")?,
        archived_by: row.try_get("archived_by")?,
        archived_at: row.try_get("archived_at")?,
    })
}
