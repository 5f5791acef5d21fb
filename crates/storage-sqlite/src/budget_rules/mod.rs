//! SQLite storage implementation for budget rules.

mod model;
mod repository;

pub use model::BudgetRuleDB;
pub use repository::BudgetRuleRepository;
