//! Database model for budget rules.

use budgetly_core::budget_rules::BudgetRule;
use budgetly_core::identity::UserId;
use budgetly_core::Error;
use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{parse_percentage, percentage_to_text};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budget_rules)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetRuleDB {
    pub id: String,
    pub user_id: String,
    pub needs_percentage: String,
    pub wants_percentage: String,
    pub savings_percentage: String,
    pub actual_needs_percentage: String,
    pub actual_wants_percentage: String,
    pub actual_savings_percentage: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BudgetRuleDB> for BudgetRule {
    type Error = Error;

    fn try_from(db: BudgetRuleDB) -> Result<Self, Self::Error> {
        Ok(Self {
            needs_percentage: parse_percentage("needs_percentage", &db.needs_percentage)?,
            wants_percentage: parse_percentage("wants_percentage", &db.wants_percentage)?,
            savings_percentage: parse_percentage("savings_percentage", &db.savings_percentage)?,
            actual_needs_percentage: parse_percentage(
                "actual_needs_percentage",
                &db.actual_needs_percentage,
            )?,
            actual_wants_percentage: parse_percentage(
                "actual_wants_percentage",
                &db.actual_wants_percentage,
            )?,
            actual_savings_percentage: parse_percentage(
                "actual_savings_percentage",
                &db.actual_savings_percentage,
            )?,
            id: db.id,
            user_id: UserId::new(db.user_id),
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<&BudgetRule> for BudgetRuleDB {
    fn from(domain: &BudgetRule) -> Self {
        Self {
            id: domain.id.clone(),
            user_id: domain.user_id.as_str().to_string(),
            needs_percentage: percentage_to_text(domain.needs_percentage),
            wants_percentage: percentage_to_text(domain.wants_percentage),
            savings_percentage: percentage_to_text(domain.savings_percentage),
            actual_needs_percentage: percentage_to_text(domain.actual_needs_percentage),
            actual_wants_percentage: percentage_to_text(domain.actual_wants_percentage),
            actual_savings_percentage: percentage_to_text(domain.actual_savings_percentage),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
