//! Budget rule domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_NEEDS_PERCENTAGE, DEFAULT_SAVINGS_PERCENTAGE, DEFAULT_WANTS_PERCENTAGE, PERCENT_SCALE,
};
use crate::identity::UserId;
use crate::money::normalize_percentage;

/// Target and actual needs/wants/savings split for one user.
///
/// Targets are user-configured. Actuals are derived by the reconciler and
/// never set directly by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRule {
    pub id: String,
    pub user_id: UserId,
    #[serde(with = "rust_decimal::serde::str")]
    pub needs_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub wants_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub savings_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub actual_needs_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub actual_wants_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub actual_savings_percentage: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl BudgetRule {
    /// A freshly materialized rule: 50/30/20 targets, zero actuals.
    pub fn with_defaults(id: String, user_id: UserId, now: NaiveDateTime) -> Self {
        let zero = Decimal::new(0, PERCENT_SCALE);
        BudgetRule {
            id,
            user_id,
            needs_percentage: normalize_percentage(Decimal::from(DEFAULT_NEEDS_PERCENTAGE)),
            wants_percentage: normalize_percentage(Decimal::from(DEFAULT_WANTS_PERCENTAGE)),
            savings_percentage: normalize_percentage(Decimal::from(DEFAULT_SAVINGS_PERCENTAGE)),
            actual_needs_percentage: zero,
            actual_wants_percentage: zero,
            actual_savings_percentage: zero,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn actuals(&self) -> ActualPercentages {
        ActualPercentages {
            needs: self.actual_needs_percentage,
            wants: self.actual_wants_percentage,
            savings: self.actual_savings_percentage,
        }
    }
}

/// Input model for changing the target split
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRuleUpdate {
    pub needs_percentage: Decimal,
    pub wants_percentage: Decimal,
    pub savings_percentage: Decimal,
}

/// Derived actual split, as written back after an aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActualPercentages {
    pub needs: Decimal,
    pub wants: Decimal,
    pub savings: Decimal,
}

/// One of the three allocation buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationBucket {
    Needs,
    Wants,
    Savings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocationStatus {
    Under,
    OnTarget,
    Over,
}

/// Target vs actual for a single bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BucketComparison {
    pub bucket: AllocationBucket,
    #[serde(with = "rust_decimal::serde::str")]
    pub target_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub actual_percentage: Decimal,
    /// `actual - target`; positive means over target.
    #[serde(with = "rust_decimal::serde::str")]
    pub difference: Decimal,
    pub status: AllocationStatus,
}
