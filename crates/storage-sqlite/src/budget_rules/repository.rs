use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use uuid::Uuid;

use budgetly_core::budget_rules::{
    ActualPercentages, BudgetRule, BudgetRuleRepositoryTrait, BudgetRuleUpdate,
};
use budgetly_core::errors::{DatabaseError, Error, Result};
use budgetly_core::identity::UserId;

use super::model::BudgetRuleDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::budget_rules;
use crate::schema::budget_rules::dsl::*;
use crate::utils::percentage_to_text;

pub struct BudgetRuleRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRuleRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRuleRepository { pool, writer }
    }
}

fn find_for_user(conn: &mut SqliteConnection, owner: &str) -> Result<Option<BudgetRuleDB>> {
    budget_rules
        .filter(user_id.eq(owner))
        .select(BudgetRuleDB::as_select())
        .first::<BudgetRuleDB>(conn)
        .optional()
        .into_core()
}

fn missing_rule(owner: &str) -> Error {
    Error::Database(DatabaseError::NotFound(format!(
        "budget rule for user {}",
        owner
    )))
}

#[async_trait]
impl BudgetRuleRepositoryTrait for BudgetRuleRepository {
    fn get_for_user(&self, owner: &UserId) -> Result<Option<BudgetRule>> {
        let mut conn = get_connection(&self.pool)?;
        find_for_user(&mut conn, owner.as_str())?
            .map(BudgetRule::try_from)
            .transpose()
    }

    async fn get_or_create(&self, owner: &UserId) -> Result<BudgetRule> {
        if let Some(existing) = self.get_for_user(owner)? {
            return Ok(existing);
        }

        let owner = owner.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetRule> {
                if let Some(existing) = find_for_user(conn, owner.as_str())? {
                    return BudgetRule::try_from(existing);
                }
                let rule = BudgetRule::with_defaults(
                    Uuid::new_v4().to_string(),
                    owner.clone(),
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(budget_rules::table)
                    .values(&BudgetRuleDB::from(&rule))
                    .returning(BudgetRuleDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                debug!("Created default budget rule for user {}", owner);
                BudgetRule::try_from(inserted)
            })
            .await
    }

    async fn update_targets(
        &self,
        owner: &UserId,
        update: BudgetRuleUpdate,
    ) -> Result<BudgetRule> {
        let owner = owner.as_str().to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetRule> {
                let updated = diesel::update(budget_rules.filter(user_id.eq(&owner)))
                    .set((
                        needs_percentage.eq(percentage_to_text(update.needs_percentage)),
                        wants_percentage.eq(percentage_to_text(update.wants_percentage)),
                        savings_percentage.eq(percentage_to_text(update.savings_percentage)),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(BudgetRuleDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| missing_rule(&owner))?;
                BudgetRule::try_from(updated)
            })
            .await
    }

    async fn update_actuals(
        &self,
        owner: &UserId,
        actuals: ActualPercentages,
    ) -> Result<BudgetRule> {
        let owner = owner.as_str().to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetRule> {
                let updated = diesel::update(budget_rules.filter(user_id.eq(&owner)))
                    .set((
                        actual_needs_percentage.eq(percentage_to_text(actuals.needs)),
                        actual_wants_percentage.eq(percentage_to_text(actuals.wants)),
                        actual_savings_percentage.eq(percentage_to_text(actuals.savings)),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(BudgetRuleDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| missing_rule(&owner))?;
                BudgetRule::try_from(updated)
            })
            .await
    }
}
