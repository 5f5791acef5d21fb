//! Database model for per-user settings.

use budgetly_core::identity::UserId;
use budgetly_core::settings::UserSettings;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_settings)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserSettingsDB {
    pub user_id: String,
    pub currency: String,
    pub language: String,
    pub theme: String,
    pub notifications_enabled: bool,
    pub budget_alerts_enabled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserSettingsDB> for UserSettings {
    fn from(db: UserSettingsDB) -> Self {
        Self {
            user_id: UserId::new(db.user_id),
            currency: db.currency,
            language: db.language,
            theme: db.theme,
            notifications_enabled: db.notifications_enabled,
            budget_alerts_enabled: db.budget_alerts_enabled,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<&UserSettings> for UserSettingsDB {
    fn from(domain: &UserSettings) -> Self {
        Self {
            user_id: domain.user_id.as_str().to_string(),
            currency: domain.currency.clone(),
            language: domain.language.clone(),
            theme: domain.theme.clone(),
            notifications_enabled: domain.notifications_enabled,
            budget_alerts_enabled: domain.budget_alerts_enabled,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
