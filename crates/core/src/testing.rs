//! In-memory repositories and fixtures shared by the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use crate::budget_rules::{
    ActualPercentages, BudgetRule, BudgetRuleRepositoryTrait, BudgetRuleUpdate,
};
use crate::errors::{DatabaseError, Error, Result};
use crate::identity::UserId;
use crate::money::Money;
use crate::records::{
    FinancialRecord, NewRecord, RecordKind, RecordRepositories, RecordRepositoryTrait, RecordType,
};
use crate::settings::{SettingsRepositoryTrait, UserSettings};
use crate::state::{compute_state, RecordSet, State, StateCache};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

fn next_id(prefix: &str) -> String {
    format!("{}-{}", prefix, NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

fn not_found(what: String) -> Error {
    Error::Database(DatabaseError::NotFound(what))
}

/// A stored record built directly, bypassing validation.
pub fn record(
    user_id: &UserId,
    kind: RecordKind,
    cents: i64,
    record_type: Option<RecordType>,
) -> FinancialRecord {
    FinancialRecord {
        id: next_id(kind.as_str()),
        user_id: user_id.clone(),
        kind,
        name: format!("{} entry", kind),
        amount: Money::from_cents(cents),
        category_id: None,
        record_type,
        due_amount: None,
        created_at: NaiveDateTime::default(),
        updated_at: NaiveDateTime::default(),
    }
}

pub fn default_rule(user_id: &UserId) -> BudgetRule {
    BudgetRule::with_defaults("rule-1".to_string(), user_id.clone(), NaiveDateTime::default())
}

/// A deterministic, empty snapshot for cache tests.
pub fn sample_state(user_id: &UserId) -> State {
    compute_state(
        user_id,
        Some(&default_rule(user_id)),
        &RecordSet::default(),
        "USD",
    )
    .unwrap()
}

pub struct MockRecordRepository {
    kind: RecordKind,
    records: Mutex<Vec<FinancialRecord>>,
}

impl MockRecordRepository {
    pub fn new(kind: RecordKind) -> Self {
        MockRecordRepository {
            kind,
            records: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RecordRepositoryTrait for MockRecordRepository {
    fn kind(&self) -> RecordKind {
        self.kind
    }

    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<FinancialRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect())
    }

    fn get_for_user(&self, user_id: &UserId, record_id: &str) -> Result<FinancialRecord> {
        let records = self.records.lock().unwrap();
        records
            .iter()
            .find(|r| &r.user_id == user_id && r.id == record_id)
            .cloned()
            .ok_or_else(|| not_found(format!("{} record {}", self.kind, record_id)))
    }

    async fn create(&self, user_id: &UserId, new_record: NewRecord) -> Result<FinancialRecord> {
        let now = Utc::now().naive_utc();
        let created = FinancialRecord {
            id: next_id(self.kind.as_str()),
            user_id: user_id.clone(),
            kind: self.kind,
            name: new_record.name,
            amount: new_record.amount,
            category_id: new_record.category_id,
            record_type: new_record.record_type,
            due_amount: new_record.due_amount,
            created_at: now,
            updated_at: now,
        };
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, record: FinancialRecord) -> Result<FinancialRecord> {
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.user_id == record.user_id && r.id == record.id)
            .ok_or_else(|| not_found(format!("{} record {}", self.kind, record.id)))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, user_id: &UserId, record_id: &str) -> Result<usize> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(&r.user_id == user_id && r.id == record_id));
        Ok(before - records.len())
    }
}

pub fn empty_repositories() -> RecordRepositories {
    RecordRepositories {
        incomes: Arc::new(MockRecordRepository::new(RecordKind::Income)),
        expenses: Arc::new(MockRecordRepository::new(RecordKind::Expense)),
        debts: Arc::new(MockRecordRepository::new(RecordKind::Debt)),
        savings: Arc::new(MockRecordRepository::new(RecordKind::Saving)),
        pleasures: Arc::new(MockRecordRepository::new(RecordKind::Pleasure)),
    }
}

/// Stores a record through the repository for `kind`.
pub async fn seed_record(
    repositories: &RecordRepositories,
    user_id: &UserId,
    kind: RecordKind,
    cents: i64,
    record_type: Option<RecordType>,
) -> FinancialRecord {
    let new_record = NewRecord {
        name: format!("{} entry", kind),
        amount: Money::from_cents(cents),
        category_id: None,
        record_type,
        due_amount: None,
    };
    repositories
        .for_kind(kind)
        .create(user_id, new_record)
        .await
        .unwrap()
}

#[derive(Default)]
pub struct MockBudgetRuleRepository {
    rules: Mutex<HashMap<UserId, BudgetRule>>,
    get_or_create_calls: AtomicUsize,
    update_actuals_calls: AtomicUsize,
    fail_actuals: bool,
}

impl MockBudgetRuleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose `update_actuals` always fails.
    pub fn failing_actuals() -> Self {
        MockBudgetRuleRepository {
            fail_actuals: true,
            ..Self::default()
        }
    }

    pub fn get_or_create_calls(&self) -> usize {
        self.get_or_create_calls.load(Ordering::SeqCst)
    }

    pub fn update_actuals_calls(&self) -> usize {
        self.update_actuals_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BudgetRuleRepositoryTrait for MockBudgetRuleRepository {
    fn get_for_user(&self, user_id: &UserId) -> Result<Option<BudgetRule>> {
        Ok(self.rules.lock().unwrap().get(user_id).cloned())
    }

    async fn get_or_create(&self, user_id: &UserId) -> Result<BudgetRule> {
        self.get_or_create_calls.fetch_add(1, Ordering::SeqCst);
        let mut rules = self.rules.lock().unwrap();
        let rule = rules.entry(user_id.clone()).or_insert_with(|| {
            BudgetRule::with_defaults(next_id("rule"), user_id.clone(), Utc::now().naive_utc())
        });
        Ok(rule.clone())
    }

    async fn update_targets(
        &self,
        user_id: &UserId,
        update: BudgetRuleUpdate,
    ) -> Result<BudgetRule> {
        let mut rules = self.rules.lock().unwrap();
        let rule = rules
            .get_mut(user_id)
            .ok_or_else(|| not_found(format!("budget rule for user {}", user_id)))?;
        rule.needs_percentage = update.needs_percentage;
        rule.wants_percentage = update.wants_percentage;
        rule.savings_percentage = update.savings_percentage;
        Ok(rule.clone())
    }

    async fn update_actuals(
        &self,
        user_id: &UserId,
        actuals: ActualPercentages,
    ) -> Result<BudgetRule> {
        self.update_actuals_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_actuals {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "database is locked".to_string(),
            )));
        }
        let mut rules = self.rules.lock().unwrap();
        let rule = rules
            .get_mut(user_id)
            .ok_or_else(|| not_found(format!("budget rule for user {}", user_id)))?;
        rule.actual_needs_percentage = actuals.needs;
        rule.actual_wants_percentage = actuals.wants;
        rule.actual_savings_percentage = actuals.savings;
        Ok(rule.clone())
    }
}

#[derive(Default)]
pub struct MockSettingsRepository {
    settings: Mutex<HashMap<UserId, UserSettings>>,
    invalidate_on_read: Option<Arc<StateCache>>,
}

impl MockSettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a concurrent write landing while a state is being computed.
    pub fn invalidating(cache: Arc<StateCache>) -> Self {
        MockSettingsRepository {
            invalidate_on_read: Some(cache),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for MockSettingsRepository {
    async fn get_or_create(&self, user_id: &UserId) -> Result<UserSettings> {
        if let Some(cache) = &self.invalidate_on_read {
            cache.invalidate(user_id);
        }
        let mut settings = self.settings.lock().unwrap();
        let entry = settings
            .entry(user_id.clone())
            .or_insert_with(|| UserSettings::with_defaults(user_id.clone(), Utc::now().naive_utc()));
        Ok(entry.clone())
    }

    async fn update(&self, updated: UserSettings) -> Result<UserSettings> {
        self.settings
            .lock()
            .unwrap()
            .insert(updated.user_id.clone(), updated.clone());
        Ok(updated)
    }
}
