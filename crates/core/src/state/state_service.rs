use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::budget_rules::{BudgetRule, BudgetRuleRepositoryTrait};
use crate::errors::{Error, Result};
use crate::identity::UserId;
use crate::records::RecordRepositories;
use crate::settings::SettingsRepositoryTrait;

use super::aggregator::compute_state;
use super::state_cache::StateCache;
use super::state_model::{RecordSet, State};

#[async_trait]
pub trait StateServiceTrait: Send + Sync {
    /// Returns the user's current snapshot, computing it if not cached.
    async fn compute_state(&self, user_id: &UserId) -> Result<State>;
}

pub struct StateService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
    budget_rule_repository: Arc<dyn BudgetRuleRepositoryTrait>,
    records: RecordRepositories,
    state_cache: Arc<StateCache>,
}

impl StateService {
    pub fn new(
        settings_repository: Arc<dyn SettingsRepositoryTrait>,
        budget_rule_repository: Arc<dyn BudgetRuleRepositoryTrait>,
        records: RecordRepositories,
        state_cache: Arc<StateCache>,
    ) -> Self {
        StateService {
            settings_repository,
            budget_rule_repository,
            records,
            state_cache,
        }
    }

    fn load_records(&self, user_id: &UserId) -> Result<RecordSet> {
        Ok(RecordSet {
            incomes: self.records.incomes.list_for_user(user_id)?,
            expenses: self.records.expenses.list_for_user(user_id)?,
            debts: self.records.debts.list_for_user(user_id)?,
            savings: self.records.savings.list_for_user(user_id)?,
            pleasures: self.records.pleasures.list_for_user(user_id)?,
        })
    }

    /// Persists freshly derived actuals when they differ from the stored
    /// ones. A failed write does not fail the read.
    async fn write_back_actuals(&self, user_id: &UserId, stored: &BudgetRule, state: &mut State) {
        let actuals = state.budget_rule.actuals();
        if actuals == stored.actuals() {
            return;
        }
        match self
            .budget_rule_repository
            .update_actuals(user_id, actuals)
            .await
        {
            Ok(updated) => state.budget_rule = updated,
            Err(e) => warn!(
                "Failed to persist actual percentages for user {}: {}",
                user_id, e
            ),
        }
    }
}

#[async_trait]
impl StateServiceTrait for StateService {
    async fn compute_state(&self, user_id: &UserId) -> Result<State> {
        if let Some(state) = self.state_cache.get(user_id) {
            debug!("State cache hit for user {}", user_id);
            return Ok(state);
        }

        let generation = self.state_cache.generation(user_id);
        let settings = self.settings_repository.get_or_create(user_id).await?;
        let mut rule = self.budget_rule_repository.get_for_user(user_id)?;
        let records = self.load_records(user_id)?;

        let mut state = match compute_state(user_id, rule.as_ref(), &records, &settings.currency) {
            Err(Error::MissingConfiguration(_)) => {
                info!("Provisioning default budget rule for user {}", user_id);
                let provisioned = self.budget_rule_repository.get_or_create(user_id).await?;
                let state =
                    compute_state(user_id, Some(&provisioned), &records, &settings.currency)?;
                rule = Some(provisioned);
                state
            }
            other => other?,
        };

        // Data changed since `generation` was read; these actuals may be outdated.
        if self.state_cache.generation(user_id) != generation {
            debug!("Skipping actuals write-back for user {}: data changed", user_id);
            return Ok(state);
        }
        if let Some(stored) = rule.as_ref() {
            self.write_back_actuals(user_id, stored, &mut state).await;
        }

        self.state_cache
            .insert_if_current(user_id, generation, state.clone());
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{RecordKind, RecordType};
    use crate::testing::{
        empty_repositories, seed_record, MockBudgetRuleRepository, MockSettingsRepository,
    };
    use rust_decimal::Decimal;

    struct Fixture {
        service: StateService,
        rules: Arc<MockBudgetRuleRepository>,
        repositories: RecordRepositories,
        cache: Arc<StateCache>,
    }

    fn fixture(rules: MockBudgetRuleRepository) -> Fixture {
        let rules = Arc::new(rules);
        let repositories = empty_repositories();
        let cache = Arc::new(StateCache::new());
        let service = StateService::new(
            Arc::new(MockSettingsRepository::new()),
            rules.clone(),
            repositories.clone(),
            cache.clone(),
        );
        Fixture {
            service,
            rules,
            repositories,
            cache,
        }
    }

    async fn seed(fixture: &Fixture, user: &UserId) {
        seed_record(&fixture.repositories, user, RecordKind::Income, 100_000, None).await;
        seed_record(
            &fixture.repositories,
            user,
            RecordKind::Expense,
            30_000,
            Some(RecordType::Fixed),
        )
        .await;
    }

    #[tokio::test]
    async fn provisions_missing_rule_and_retries_once() {
        let f = fixture(MockBudgetRuleRepository::new());
        let user = UserId::from("u1");
        seed(&f, &user).await;

        let state = f.service.compute_state(&user).await.unwrap();
        assert_eq!(state.remains_budget.to_string(), "700.00");
        assert_eq!(state.budget_rule.needs_percentage.to_string(), "50.00");
        assert_eq!(f.rules.get_or_create_calls(), 1);
    }

    #[tokio::test]
    async fn writes_back_changed_actuals() {
        let f = fixture(MockBudgetRuleRepository::new());
        let user = UserId::from("u1");
        seed(&f, &user).await;

        f.service.compute_state(&user).await.unwrap();
        let stored = f.rules.get_for_user(&user).unwrap().unwrap();
        assert_eq!(stored.actual_needs_percentage.to_string(), "30.00");
        assert_eq!(f.rules.update_actuals_calls(), 1);

        // Nothing changed, so a recompute must not write again.
        f.cache.invalidate(&user);
        f.service.compute_state(&user).await.unwrap();
        assert_eq!(f.rules.update_actuals_calls(), 1);
    }

    #[tokio::test]
    async fn failed_write_back_still_returns_state() {
        let f = fixture(MockBudgetRuleRepository::failing_actuals());
        let user = UserId::from("u1");
        seed(&f, &user).await;

        let state = f.service.compute_state(&user).await.unwrap();
        assert_eq!(state.budget_rule.actual_needs_percentage.to_string(), "30.00");
        let stored = f.rules.get_for_user(&user).unwrap().unwrap();
        assert_eq!(stored.actual_needs_percentage, Decimal::ZERO);
    }

    #[tokio::test]
    async fn write_during_computation_skips_write_back_and_cache() {
        let rules = Arc::new(MockBudgetRuleRepository::new());
        let repositories = empty_repositories();
        let cache = Arc::new(StateCache::new());
        let service = StateService::new(
            Arc::new(MockSettingsRepository::invalidating(cache.clone())),
            rules.clone(),
            repositories.clone(),
            cache.clone(),
        );
        let user = UserId::from("u1");
        seed_record(&repositories, &user, RecordKind::Income, 100_000, None).await;

        let state = service.compute_state(&user).await.unwrap();
        assert_eq!(state.total_budget.to_string(), "1000.00");
        assert_eq!(rules.update_actuals_calls(), 0);
        assert!(cache.get(&user).is_none());
    }

    #[tokio::test]
    async fn serves_cached_state_until_invalidated() {
        let f = fixture(MockBudgetRuleRepository::new());
        let user = UserId::from("u1");
        seed(&f, &user).await;

        let first = f.service.compute_state(&user).await.unwrap();
        seed_record(&f.repositories, &user, RecordKind::Income, 50_000, None).await;
        let cached = f.service.compute_state(&user).await.unwrap();
        assert_eq!(first, cached);

        f.cache.invalidate(&user);
        let fresh = f.service.compute_state(&user).await.unwrap();
        assert_eq!(fresh.total_budget.to_string(), "1500.00");
    }

    #[tokio::test]
    async fn users_do_not_see_each_other() {
        let f = fixture(MockBudgetRuleRepository::new());
        let alice = UserId::from("alice");
        let bob = UserId::from("bob");
        seed(&f, &alice).await;

        let state = f.service.compute_state(&bob).await.unwrap();
        assert_eq!(state.total_budget.cents(), 0);
        assert_eq!(state.total_fixed.cents(), 0);
    }
}
