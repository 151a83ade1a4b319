pub mod password;

use tracing::info;

use crate::database::models::{
    AdminAccount, EmergencyInfoUpdate, NewAdminAccount, NewStudentAccount, StudentAccount,
};
use crate::database::queries::Queries;
use crate::database::Database;
use crate::error::Result;

/// Student and admin account management. Passwords are argon2-hashed before
/// they reach the database; plaintext never leaves this module.
pub struct AccountService {
    db: Database,
}

impl AccountService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create_student(&self, new: NewStudentAccount) -> Result<StudentAccount> {
        let hash = password::hash_password(&new.password)?;
        let account = self.db.create_student(&new, &hash).await?;
        info!("created student account {}", account.user_id);
        Ok(account)
    }

    pub async fn create_admin(&self, new: NewAdminAccount) -> Result<AdminAccount> {
        let hash = password::hash_password(&new.password)?;
        let account = self.db.create_admin(&new, &hash).await?;
        info!("created admin account {}", account.user_id);
        Ok(account)
    }

    /// Check credentials against the student table. Returns the account on a
    /// match, `None` on an unknown username or wrong password.
    pub async fn authenticate_student(
        &self,
        username: &str,
        candidate: &str,
    ) -> Result<Option<StudentAccount>> {
        match Queries::student_by_username(self.db.pool(), username).await? {
            Some(account) if password::verify_password(&account.student_pass, candidate)? => {
                Ok(Some(account))
            }
            _ => Ok(None),
        }
    }

    pub async fn set_student_active(&self, user_id: i64, active: bool) -> Result<StudentAccount> {
        let status = if active { "active" } else { "inactive" };
        self.db.set_student_status(user_id, status).await
    }

    pub async fn update_emergency_info(
        &self,
        user_id: i64,
        update: EmergencyInfoUpdate,
    ) -> Result<StudentAccount> {
        self.db.update_emergency_info(user_id, &update).await
    }

    pub async fn student(&self, user_id: i64) -> Result<Option<StudentAccount>> {
        Queries::student(self.db.pool(), user_id).await
    }
}
