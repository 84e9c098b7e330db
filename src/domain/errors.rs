//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Referenced resource does not exist
    NotFound(String),
    /// Malformed or out-of-range input, rejected before any store access
    Validation(String),
    /// Syntactically invalid identifier (e.g. malformed UUID)
    InvalidId(String),
    /// Uniqueness constraint violation (duplicate email, duplicate
    /// book-author pair, second details row for a book)
    Conflict(String),
    /// Database/persistence error
    Database(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound(what) => write!(f, "{} not found", what),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::InvalidId(id) => write!(f, "Invalid identifier: {}", id),
            DomainError::Conflict(msg) => write!(f, "Constraint violation: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure and services).
// Unique-constraint failures are never transient, so they surface as
// Conflict rather than Database and are never retried.
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        let msg = e.to_string();
        if msg.contains("UNIQUE constraint failed") || msg.contains("unique constraint") {
            DomainError::Conflict(msg)
        } else {
            DomainError::Database(msg)
        }
    }
}
