//! Derived budget snapshot.

use serde::{Deserialize, Serialize};

use crate::budget_rules::{BucketComparison, BudgetRule};
use crate::money::Money;
use crate::records::FinancialRecord;

/// A user's current totals and rule reconciliation. Recomputed on demand,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub currency: String,
    pub total_budget: Money,
    pub total_fixed: Money,
    pub total_variable: Money,
    pub total_debt: Money,
    pub savings: Money,
    pub total_pleasure: Money,
    /// Budget minus every outflow. Negative when overspent.
    pub remains_budget: Money,
    pub budget_rule: BudgetRule,
    pub allocations: Vec<BucketComparison>,
}

/// The five record collections of one user, read together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub incomes: Vec<FinancialRecord>,
    pub expenses: Vec<FinancialRecord>,
    pub debts: Vec<FinancialRecord>,
    pub savings: Vec<FinancialRecord>,
    pub pleasures: Vec<FinancialRecord>,
}
