//! Budget rules module - target split, reconciliation and services.

mod budget_rules_model;
mod budget_rules_service;
mod budget_rules_traits;
pub mod reconciler;

pub use budget_rules_model::{
    ActualPercentages, AllocationBucket, AllocationStatus, BucketComparison, BudgetRule,
    BudgetRuleUpdate,
};
pub use budget_rules_service::{validate_budget_rule_update, BudgetRuleService};
pub use budget_rules_traits::{BudgetRuleRepositoryTrait, BudgetRuleServiceTrait};
pub use reconciler::{compare, reconcile, BucketAmounts};
