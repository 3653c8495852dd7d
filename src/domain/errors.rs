//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The API layer maps each variant onto an HTTP status.

use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Create targeted a key that is already stored
    #[error("{0}")]
    AlreadyExists(String),
    /// Update/delete/lookup targeted a key that is not stored
    #[error("{0}")]
    NotFound(String),
    /// Request references values that do not resolve
    #[error("{0}")]
    Validation(String),
    /// Uniqueness or reference rule rejected the write
    #[error("Data conflict: {0}")]
    Conflict(String),
    /// Any other storage-level integrity violation
    #[error("Data integrity violation: {0}")]
    Integrity(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                tracing::warn!("Unique constraint rejected write: {}", msg);
                DomainError::Conflict("This combination of values is not allowed".to_string())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                tracing::warn!("Foreign key constraint rejected write: {}", msg);
                DomainError::Integrity("a referenced record is missing or still in use".to_string())
            }
            _ => DomainError::Database(e.to_string()),
        }
    }
}
