//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::identity::UserId;
use crate::settings::{SettingsUpdate, UserSettings};

/// Repository trait for per-user settings.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get the user's settings, creating the defaults on first access.
    async fn get_or_create(&self, user_id: &UserId) -> Result<UserSettings>;

    /// Persist a complete settings row.
    async fn update(&self, settings: UserSettings) -> Result<UserSettings>;
}
