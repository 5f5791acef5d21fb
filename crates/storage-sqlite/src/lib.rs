//! SQLite storage implementation for Budgetly.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `budgetly-core` and contains:
//! - Database connection pooling and the single writer actor
//! - The embedded Diesel migration
//! - Repository implementations for records, budget rules and settings
//! - Database-specific model types (with Diesel derives)
//!
//! Money and percentages are persisted as decimal TEXT and converted back
//! through [`utils`].

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod budget_rules;
pub mod records;
pub mod settings;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from budgetly-core for convenience
pub use budgetly_core::errors::{DatabaseError, Error, Result};
