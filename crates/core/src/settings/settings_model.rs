//! Per-user settings models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CURRENCY, DEFAULT_LANGUAGE, DEFAULT_THEME};
use crate::identity::UserId;

pub const THEMES: [&str; 3] = ["light", "dark", "system"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub user_id: UserId,
    pub currency: String,
    pub language: String,
    pub theme: String,
    pub notifications_enabled: bool,
    pub budget_alerts_enabled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl UserSettings {
    /// Settings a user gets the first time they are read.
    pub fn with_defaults(user_id: UserId, now: NaiveDateTime) -> Self {
        UserSettings {
            user_id,
            currency: DEFAULT_CURRENCY.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            theme: DEFAULT_THEME.to_string(),
            notifications_enabled: true,
            budget_alerts_enabled: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub currency: Option<String>,
    pub language: Option<String>,
    pub theme: Option<String>,
    pub notifications_enabled: Option<bool>,
    pub budget_alerts_enabled: Option<bool>,
}

impl SettingsUpdate {
    pub fn apply_to(&self, settings: &UserSettings) -> UserSettings {
        let mut updated = settings.clone();
        if let Some(currency) = &self.currency {
            updated.currency = currency.clone();
        }
        if let Some(language) = &self.language {
            updated.language = language.clone();
        }
        if let Some(theme) = &self.theme {
            updated.theme = theme.clone();
        }
        if let Some(enabled) = self.notifications_enabled {
            updated.notifications_enabled = enabled;
        }
        if let Some(enabled) = self.budget_alerts_enabled {
            updated.budget_alerts_enabled = enabled;
        }
        updated
    }
}
