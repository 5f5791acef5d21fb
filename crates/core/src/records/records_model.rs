//! Financial record domain models.
//!
//! All five record collections (incomes, expenses, debts, savings, pleasures)
//! share one shape; the collection is carried by [`RecordKind`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use crate::identity::UserId;
use crate::money::Money;

/// The collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
    Debt,
    Saving,
    Pleasure,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Income,
        RecordKind::Expense,
        RecordKind::Debt,
        RecordKind::Saving,
        RecordKind::Pleasure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
            RecordKind::Debt => "debt",
            RecordKind::Saving => "saving",
            RecordKind::Pleasure => "pleasure",
        }
    }

    /// Plural form used for route segments.
    pub fn collection_name(&self) -> &'static str {
        match self {
            RecordKind::Income => "incomes",
            RecordKind::Expense => "expenses",
            RecordKind::Debt => "debts",
            RecordKind::Saving => "savings",
            RecordKind::Pleasure => "pleasures",
        }
    }

    pub fn from_collection_name(name: &str) -> Option<Self> {
        RecordKind::ALL
            .into_iter()
            .find(|k| k.collection_name() == name)
    }

    /// Sub-types a record of this kind may carry. Empty means none allowed.
    pub fn allowed_types(&self) -> &'static [RecordType] {
        match self {
            RecordKind::Expense => &[RecordType::Fixed, RecordType::Variable],
            RecordKind::Saving => &[RecordType::Invest, RecordType::Saving],
            RecordKind::Income | RecordKind::Debt | RecordKind::Pleasure => &[],
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown record kind '{}'",
                    s
                )))
            })
    }
}

/// Discriminator carried by expenses (`fixed`/`variable`) and savings
/// (`invest`/`saving`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Fixed,
    Variable,
    Invest,
    Saving,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Fixed => "fixed",
            RecordType::Variable => "variable",
            RecordType::Invest => "invest",
            RecordType::Saving => "saving",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(RecordType::Fixed),
            "variable" => Ok(RecordType::Variable),
            "invest" => Ok(RecordType::Invest),
            "saving" => Ok(RecordType::Saving),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown record type '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing one income, expense, debt, saving or pleasure entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: String,
    pub user_id: UserId,
    pub kind: RecordKind,
    pub name: String,
    /// Budgeted amount; the only value that enters totals.
    pub amount: Money,
    pub category_id: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<RecordType>,
    /// Outstanding balance of a debt. Informational only.
    pub due_amount: Option<Money>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new record
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub name: String,
    pub amount: Money,
    pub category_id: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<RecordType>,
    pub due_amount: Option<Money>,
}

/// Input model for updating an existing record. Absent fields are kept.
///
/// `category_id` and `due_amount` distinguish an absent field (`None`) from
/// an explicit `null` (`Some(None)`), which clears the stored value.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordUpdate {
    pub name: Option<String>,
    pub amount: Option<Money>,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<Option<String>>,
    #[serde(rename = "type")]
    pub record_type: Option<RecordType>,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_amount: Option<Option<Money>>,
}

impl RecordUpdate {
    /// Applies the update onto a copy of `record`.
    pub fn apply_to(&self, record: &FinancialRecord) -> FinancialRecord {
        let mut updated = record.clone();
        if let Some(name) = &self.name {
            updated.name = name.trim().to_string();
        }
        if let Some(amount) = self.amount {
            updated.amount = amount;
        }
        if let Some(category_id) = &self.category_id {
            updated.category_id = category_id.clone();
        }
        if let Some(record_type) = self.record_type {
            updated.record_type = Some(record_type);
        }
        if let Some(due_amount) = self.due_amount {
            updated.due_amount = due_amount;
        }
        updated
    }
}
