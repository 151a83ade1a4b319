pub mod models;
pub mod queries;
pub mod schema;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::error::{AlertError, Result};
use crate::validation::{IncidentLookup, StudentDirectory};
use models::*;
use queries::Queries;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Database { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        for (name, sql) in schema::MIGRATIONS {
            sqlx::raw_sql(sql).execute(&self.pool).await?;
            info!("applied migration {}", name);
        }
        Ok(())
    }

    pub async fn create_student(
        &self,
        new: &NewStudentAccount,
        password_hash: &str,
    ) -> Result<StudentAccount> {
        let row = sqlx::query(
            r#"
            INSERT INTO accounts_student
                (student_id, student_user, student_pass, student_email, full_name,
                 student_yearlvl, student_cnum)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING user_id, student_id, student_user, student_pass, student_email, full_name,
                      student_yearlvl, student_cnum, student_emergencycontact,
                      student_contactperson, student_medinfo, student_address, student_profile,
                      student_status, student_created_at
            "#,
        )
        .bind(&new.student_id)
        .bind(&new.username)
        .bind(password_hash)
        .bind(&new.email)
        .bind(&new.full_name)
        .bind(&new.year_level)
        .bind(&new.contact_number)
        .fetch_one(&self.pool)
        .await?;

        queries::student_from_row(&row)
    }

    pub async fn create_admin(
        &self,
        new: &NewAdminAccount,
        password_hash: &str,
    ) -> Result<AdminAccount> {
        let row = sqlx::query(
            r#"
            INSERT INTO accounts_admin (admin_user, admin_pass, full_name, admin_email)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, admin_user, admin_pass, full_name, admin_email, created_at
            "#,
        )
        .bind(&new.username)
        .bind(password_hash)
        .bind(&new.full_name)
        .bind(&new.email)
        .fetch_one(&self.pool)
        .await?;

        queries::admin_from_row(&row)
    }

    pub async fn set_student_status(&self, user_id: i64, status: &str) -> Result<StudentAccount> {
        let row = sqlx::query(
            r#"
            UPDATE accounts_student
            SET student_status = $2
            WHERE user_id = $1
            RETURNING user_id, student_id, student_user, student_pass, student_email, full_name,
                      student_yearlvl, student_cnum, student_emergencycontact,
                      student_contactperson, student_medinfo, student_address, student_profile,
                      student_status, student_created_at
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AlertError::NotFound(format!("student account {}", user_id)))?;

        queries::student_from_row(&row)
    }

    pub async fn update_emergency_info(
        &self,
        user_id: i64,
        update: &EmergencyInfoUpdate,
    ) -> Result<StudentAccount> {
        let row = sqlx::query(
            r#"
            UPDATE accounts_student
            SET student_emergencycontact = COALESCE($2, student_emergencycontact),
                student_contactperson = COALESCE($3, student_contactperson),
                student_medinfo = COALESCE($4, student_medinfo),
                student_address = COALESCE($5, student_address)
            WHERE user_id = $1
            RETURNING user_id, student_id, student_user, student_pass, student_email, full_name,
                      student_yearlvl, student_cnum, student_emergencycontact,
                      student_contactperson, student_medinfo, student_address, student_profile,
                      student_status, student_created_at
            "#,
        )
        .bind(user_id)
        .bind(&update.emergency_contact)
        .bind(&update.contact_person)
        .bind(&update.medical_info)
        .bind(&update.address)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AlertError::NotFound(format!("student account {}", user_id)))?;

        queries::student_from_row(&row)
    }

    pub async fn create_incident(
        &self,
        incident_id: &str,
        new: &NewIncident,
    ) -> Result<Incident> {
        let row = sqlx::query(
            r#"
            INSERT INTO incident_reports (incident_id, reporter_id, incident_type, description, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING incident_id, reporter_id, incident_type, description, location, status, reported_at
            "#,
        )
        .bind(incident_id)
        .bind(new.reporter_id)
        .bind(&new.incident_type)
        .bind(&new.description)
        .bind(&new.location)
        .fetch_one(&self.pool)
        .await?;

        queries::incident_from_row(&row)
    }

    pub async fn set_incident_status(&self, incident_id: &str, status: &str) -> Result<Incident> {
        let row = sqlx::query(
            r#"
            UPDATE incident_reports
            SET status = $2
            WHERE incident_id = $1
            RETURNING incident_id, reporter_id, incident_type, description, location, status, reported_at
            "#,
        )
        .bind(incident_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AlertError::NotFound(format!("incident {}", incident_id)))?;

        queries::incident_from_row(&row)
    }

    pub async fn insert_chat_message(&self, msg: &NewChatMessage) -> Result<ChatMessage> {
        let row = sqlx::query(
            r#"
            INSERT INTO chat_messages (incident_id, sender_id, sender_role, receiver_id, receiver_role, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING message_id, incident_id, sender_id, sender_role, receiver_id, receiver_role,
                      message, is_read, sent_at
            "#,
        )
        .bind(&msg.incident_id)
        .bind(msg.sender_id)
        .bind(msg.sender_role.as_str())
        .bind(msg.receiver_id)
        .bind(msg.receiver_role.as_str())
        .bind(&msg.message)
        .fetch_one(&self.pool)
        .await?;

        queries::chat_message_from_row(&row)
    }

    pub async fn set_message_read(&self, message_id: i64) -> Result<ChatMessage> {
        let row = sqlx::query(
            r#"
            UPDATE chat_messages
            SET is_read = TRUE
            WHERE message_id = $1
            RETURNING message_id, incident_id, sender_id, sender_role, receiver_id, receiver_role,
                      message, is_read, sent_at
            "#,
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AlertError::NotFound(format!("chat message {}", message_id)))?;

        queries::chat_message_from_row(&row)
    }

    /// Move an incident into the archive and delete the live row. Chat
    /// messages go with it via the cascade. Snapshot and delete commit
    /// together or not at all.
    pub async fn archive_incident(
        &self,
        incident_id: &str,
        archived_by: i64,
    ) -> Result<ArchivedIncident> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT incident_id, reporter_id, incident_type, description, location, status, reported_at
            FROM incident_reports
            WHERE incident_id = $1
            "#,
        )
        .bind(incident_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AlertError::NotFound(format!("incident {}", incident_id)))?;

        let incident = queries::incident_from_row(&row)?;

        let archived_row = sqlx::query(
            r#"
            INSERT INTO incident_archive
                (incident_id, reporter_id, incident_type, description, location, reported_at, archived_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING archive_id, incident_id, reporter_id, incident_type, description, location,
                      reported_at, archived_by, archived_at
            "#,
        )
        .bind(&incident.incident_id)
        .bind(incident.reporter_id)
        .bind(&incident.incident_type)
        .bind(&incident.description)
        .bind(&incident.location)
        .bind(incident.reported_at)
        .bind(archived_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM incident_reports WHERE incident_id = $1")
            .bind(incident_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("archived incident {}", incident_id);
        queries::archived_from_row(&archived_row)
    }
}

#[async_trait]
impl IncidentLookup for Database {
    async fn reporter_of(&self, incident_id: &str) -> Result<Option<i64>> {
        Queries::reporter_of(&self.pool, incident_id).await
    }
}

#[async_trait]
impl StudentDirectory for Database {
    async fn student_exists(&self, user_id: i64) -> Result<bool> {
        Queries::student_exists(&self.pool, user_id).await
    }
}
