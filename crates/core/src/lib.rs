//! Budgetly Core - Domain entities, services, and traits.
//!
//! This crate holds the budgeting logic: record validation, the budget rule
//! reconciler and the pure state aggregator. It is database-agnostic and
//! defines traits that are implemented by the `storage-sqlite` crate.

pub mod budget_rules;
pub mod constants;
pub mod errors;
pub mod identity;
pub mod money;
pub mod records;
pub mod settings;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
