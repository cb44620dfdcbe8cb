//! Typed errors that callers may want to match on.
//!
//! Services return `anyhow::Result`; these enums travel inside the
//! `anyhow::Error` and can be recovered with `downcast_ref`.

use thiserror::Error;

/// Errors raised while reading or writing the data directory
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid record in {file} at line {line}: {reason}")]
    InvalidRecord {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

/// Business rule violations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    #[error("Invalid amount for {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },
}
