use crate::budget_rules::budget_rules_model::{ActualPercentages, BudgetRule, BudgetRuleUpdate};
use crate::errors::Result;
use crate::identity::UserId;
use async_trait::async_trait;

/// Trait for budget rule repository operations
#[async_trait]
pub trait BudgetRuleRepositoryTrait: Send + Sync {
    /// Returns the stored rule, or `None` if the user has never had one.
    fn get_for_user(&self, user_id: &UserId) -> Result<Option<BudgetRule>>;

    /// Returns the stored rule, creating the default one on first access.
    async fn get_or_create(&self, user_id: &UserId) -> Result<BudgetRule>;

    async fn update_targets(
        &self,
        user_id: &UserId,
        update: BudgetRuleUpdate,
    ) -> Result<BudgetRule>;

    async fn update_actuals(
        &self,
        user_id: &UserId,
        actuals: ActualPercentages,
    ) -> Result<BudgetRule>;
}

/// Trait for budget rule service operations
#[async_trait]
pub trait BudgetRuleServiceTrait: Send + Sync {
    async fn get_budget_rule(&self, user_id: &UserId) -> Result<BudgetRule>;
    async fn update_targets(
        &self,
        user_id: &UserId,
        update: BudgetRuleUpdate,
    ) -> Result<BudgetRule>;
}
