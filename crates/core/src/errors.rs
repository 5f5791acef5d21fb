//! Core error types for Budgetly.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the budgeting core.
///
/// Validation failures are raised at the ingestion boundary (record and
/// settings services). The aggregator itself only ever raises
/// `MissingConfiguration` or `Computation`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Raised only when validated input still produces an impossible
    /// aggregation. Not recoverable.
    #[error("Computation failed: {0}")]
    Computation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Database(DatabaseError::NotFound(_)) => "not_found",
            Error::Database(_) => "database",
            Error::Validation(_) => "validation",
            Error::Unauthenticated(_) => "unauthenticated",
            Error::MissingConfiguration(_) => "missing_configuration",
            Error::InvalidRecord(_) => "invalid_record",
            Error::Computation(_) => "computation",
            Error::Unexpected(_) => "unexpected",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::NotFound(_)))
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid percentage: {0}")]
    InvalidPercentage(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(
            Error::MissingConfiguration("rule".into()).kind(),
            "missing_configuration"
        );
        assert_eq!(Error::InvalidRecord("bad".into()).kind(), "invalid_record");
        assert_eq!(
            Error::Database(DatabaseError::NotFound("x".into())).kind(),
            "not_found"
        );
        assert_eq!(
            Error::Database(DatabaseError::QueryFailed("x".into())).kind(),
            "database"
        );
    }

    #[test]
    fn not_found_is_detected() {
        assert!(Error::Database(DatabaseError::NotFound("x".into())).is_not_found());
        assert!(!Error::Unauthenticated("x".into()).is_not_found());
    }
}
