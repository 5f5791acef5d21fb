use super::SettingsRepositoryTrait;
use crate::constants::MAX_LANGUAGE_LEN;
use crate::errors::{Error, Result, ValidationError};
use crate::identity::UserId;
use crate::settings::{SettingsUpdate, UserSettings, THEMES};
use crate::state::StateCache;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

// Define the trait for SettingsService
#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    async fn get_settings(&self, user_id: &UserId) -> Result<UserSettings>;

    async fn update_settings(
        &self,
        user_id: &UserId,
        new_settings: &SettingsUpdate,
    ) -> Result<UserSettings>;
}

/// Checks every field present in the update.
pub fn validate_settings_update(update: &SettingsUpdate) -> Result<()> {
    if let Some(currency) = &update.currency {
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(invalid(format!(
                "currency must be a three-letter uppercase code, got '{}'",
                currency
            )));
        }
    }
    if let Some(language) = &update.language {
        let language = language.trim();
        if language.is_empty() || language.len() > MAX_LANGUAGE_LEN {
            return Err(invalid(format!(
                "language must be 1 to {} characters",
                MAX_LANGUAGE_LEN
            )));
        }
    }
    if let Some(theme) = &update.theme {
        if !THEMES.contains(&theme.as_str()) {
            return Err(invalid(format!(
                "theme must be one of {}, got '{}'",
                THEMES.join(", "),
                theme
            )));
        }
    }
    Ok(())
}

fn invalid(detail: String) -> Error {
    Error::Validation(ValidationError::InvalidInput(detail))
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
    state_cache: Arc<StateCache>,
}

impl SettingsService {
    pub fn new(
        settings_repository: Arc<dyn SettingsRepositoryTrait>,
        state_cache: Arc<StateCache>,
    ) -> Self {
        SettingsService {
            settings_repository,
            state_cache,
        }
    }
}

// Implement the trait for SettingsService
#[async_trait]
impl SettingsServiceTrait for SettingsService {
    async fn get_settings(&self, user_id: &UserId) -> Result<UserSettings> {
        self.settings_repository.get_or_create(user_id).await
    }

    async fn update_settings(
        &self,
        user_id: &UserId,
        new_settings: &SettingsUpdate,
    ) -> Result<UserSettings> {
        validate_settings_update(new_settings)?;

        let current = self.settings_repository.get_or_create(user_id).await?;
        let mut merged = new_settings.apply_to(&current);
        merged.language = merged.language.trim().to_string();
        let updated = self.settings_repository.update(merged).await?;

        if updated.currency != current.currency {
            info!(
                "Currency for user {} changed from {} to {}",
                user_id, current.currency, updated.currency
            );
            self.state_cache.invalidate(user_id);
        } else {
            debug!("Settings updated for user {}", user_id);
        }
        Ok(updated)
    }
}
