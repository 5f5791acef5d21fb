//! SQLite storage implementation for settings.

mod model;
mod repository;

pub use model::UserSettingsDB;
pub use repository::SettingsRepository;

// Re-export trait from core for convenience
pub use budgetly_core::settings::SettingsRepositoryTrait;
