//! Database model for financial records.

use budgetly_core::identity::UserId;
use budgetly_core::records::FinancialRecord;
use budgetly_core::Error;
use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{money_to_text, parse_column, parse_money, parse_optional_money};

/// One row of `financial_records`. `kind` selects the collection.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::financial_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecordDB {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub name: String,
    pub amount: String,
    pub category_id: Option<String>,
    pub record_type: Option<String>,
    pub due_amount: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<RecordDB> for FinancialRecord {
    type Error = Error;

    fn try_from(db: RecordDB) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: parse_column("kind", &db.kind)?,
            amount: parse_money("amount", &db.amount)?,
            record_type: db
                .record_type
                .as_deref()
                .map(|t| parse_column("record_type", t))
                .transpose()?,
            due_amount: parse_optional_money("due_amount", db.due_amount.as_deref())?,
            id: db.id,
            user_id: UserId::new(db.user_id),
            name: db.name,
            category_id: db.category_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<&FinancialRecord> for RecordDB {
    fn from(domain: &FinancialRecord) -> Self {
        Self {
            id: domain.id.clone(),
            user_id: domain.user_id.as_str().to_string(),
            kind: domain.kind.as_str().to_string(),
            name: domain.name.clone(),
            amount: money_to_text(domain.amount),
            category_id: domain.category_id.clone(),
            record_type: domain.record_type.map(|t| t.as_str().to_string()),
            due_amount: domain.due_amount.map(money_to_text),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
