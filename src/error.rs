use thiserror::Error;

pub use crate::validation::reporter_check::{GuardError, Participant};

pub type Result<T> = std::result::Result<T, AlertError>;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    /// A chat write violated the incident-reporter invariant. Fatal to that
    /// write; the reason surfaces unchanged to the caller.
    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error("password error: {0}")]
    Password(String),
}

impl From<sqlx::Error> for AlertError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db) = err.as_database_error() {
            if db.is_unique_violation() {
                return Self::Duplicate(db.message().to_string());
            }
        }
        Self::Database(err.to_string())
    }
}
