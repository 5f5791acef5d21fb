//! SQLite storage implementation for the five record collections.

mod model;
mod repository;

pub use model::RecordDB;
pub use repository::{record_repositories, RecordRepository};

// Re-export trait from core for convenience
pub use budgetly_core::records::RecordRepositoryTrait;
