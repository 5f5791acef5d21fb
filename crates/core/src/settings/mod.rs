mod settings_model;
mod settings_service;
mod settings_traits;

pub use settings_model::{SettingsUpdate, UserSettings, THEMES};
pub use settings_service::{validate_settings_update, SettingsService, SettingsServiceTrait};
pub use settings_traits::SettingsRepositoryTrait;
