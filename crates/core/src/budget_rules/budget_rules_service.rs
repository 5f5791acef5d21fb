use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;

use crate::constants::PERCENT_SCALE;
use crate::errors::{Error, Result, ValidationError};
use crate::identity::UserId;
use crate::money::normalize_percentage;
use crate::state::{StateCache, StateServiceTrait};

use super::budget_rules_model::{BudgetRule, BudgetRuleUpdate};
use super::budget_rules_traits::{BudgetRuleRepositoryTrait, BudgetRuleServiceTrait};

/// Each target must lie in [0, 100] with at most two fractional digits, and
/// the three must add up to exactly 100.
pub fn validate_budget_rule_update(update: &BudgetRuleUpdate) -> Result<()> {
    let hundred = Decimal::ONE_HUNDRED;
    for (field, value) in [
        ("needsPercentage", update.needs_percentage),
        ("wantsPercentage", update.wants_percentage),
        ("savingsPercentage", update.savings_percentage),
    ] {
        if value < Decimal::ZERO || value > hundred {
            return Err(invalid(format!(
                "{} must be between 0 and 100, got {}",
                field, value
            )));
        }
        if value.normalize().scale() > PERCENT_SCALE {
            return Err(invalid(format!(
                "{} must have at most {} decimal places, got {}",
                field, PERCENT_SCALE, value
            )));
        }
    }

    let sum = update.needs_percentage + update.wants_percentage + update.savings_percentage;
    if sum != hundred {
        return Err(invalid(format!("percentages must sum to 100, got {}", sum)));
    }
    Ok(())
}

fn invalid(detail: String) -> Error {
    Error::Validation(ValidationError::InvalidPercentage(detail))
}

/// Reads go through the state service so the returned actuals always match
/// the user's current records.
pub struct BudgetRuleService {
    repository: Arc<dyn BudgetRuleRepositoryTrait>,
    state_service: Arc<dyn StateServiceTrait>,
    state_cache: Arc<StateCache>,
}

impl BudgetRuleService {
    pub fn new(
        repository: Arc<dyn BudgetRuleRepositoryTrait>,
        state_service: Arc<dyn StateServiceTrait>,
        state_cache: Arc<StateCache>,
    ) -> Self {
        BudgetRuleService {
            repository,
            state_service,
            state_cache,
        }
    }
}

#[async_trait]
impl BudgetRuleServiceTrait for BudgetRuleService {
    async fn get_budget_rule(&self, user_id: &UserId) -> Result<BudgetRule> {
        let state = self.state_service.compute_state(user_id).await?;
        Ok(state.budget_rule)
    }

    async fn update_targets(
        &self,
        user_id: &UserId,
        update: BudgetRuleUpdate,
    ) -> Result<BudgetRule> {
        validate_budget_rule_update(&update)?;
        let normalized = BudgetRuleUpdate {
            needs_percentage: normalize_percentage(update.needs_percentage),
            wants_percentage: normalize_percentage(update.wants_percentage),
            savings_percentage: normalize_percentage(update.savings_percentage),
        };

        // Make sure a row exists before updating it.
        self.repository.get_or_create(user_id).await?;
        let updated = self.repository.update_targets(user_id, normalized).await?;
        info!(
            "Budget rule targets for user {} set to {}/{}/{}",
            user_id, updated.needs_percentage, updated.wants_percentage, updated.savings_percentage
        );
        self.state_cache.invalidate(user_id);
        self.get_budget_rule(user_id).await
    }
}
