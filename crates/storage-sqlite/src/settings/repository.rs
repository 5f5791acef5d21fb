use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::UserSettingsDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::user_settings;
use crate::schema::user_settings::dsl::*;
use budgetly_core::errors::{DatabaseError, Error, Result};
use budgetly_core::identity::UserId;
use budgetly_core::settings::{SettingsRepositoryTrait, UserSettings};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

fn find_settings(conn: &mut SqliteConnection, owner: &str) -> Result<Option<UserSettingsDB>> {
    user_settings
        .find(owner)
        .select(UserSettingsDB::as_select())
        .first::<UserSettingsDB>(conn)
        .optional()
        .into_core()
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    async fn get_or_create(&self, owner: &UserId) -> Result<UserSettings> {
        // Fast path on a pooled reader; only a first access needs the writer.
        {
            let mut conn = get_connection(&self.pool)?;
            if let Some(row) = find_settings(&mut conn, owner.as_str())? {
                return Ok(row.into());
            }
        }

        let owner = owner.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UserSettings> {
                if let Some(row) = find_settings(conn, owner.as_str())? {
                    return Ok(row.into());
                }

                let defaults = UserSettings::with_defaults(owner, Utc::now().naive_utc());
                let inserted = diesel::insert_into(user_settings::table)
                    .values(&UserSettingsDB::from(&defaults))
                    .returning(UserSettingsDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    async fn update(&self, settings: UserSettings) -> Result<UserSettings> {
        let row = UserSettingsDB::from(&settings);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UserSettings> {
                diesel::update(user_settings.find(&row.user_id))
                    .set((
                        currency.eq(&row.currency),
                        language.eq(&row.language),
                        theme.eq(&row.theme),
                        notifications_enabled.eq(row.notifications_enabled),
                        budget_alerts_enabled.eq(row.budget_alerts_enabled),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(UserSettingsDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .map(UserSettings::from)
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "settings for user {}",
                            row.user_id
                        )))
                    })
            })
            .await
    }
}
