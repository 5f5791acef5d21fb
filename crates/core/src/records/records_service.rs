use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::errors::{DatabaseError, Error, Result};
use crate::identity::UserId;
use crate::state::StateCache;

use super::records_model::{FinancialRecord, NewRecord, RecordKind, RecordUpdate};
use super::records_traits::{RecordRepositoryTrait, RecordServiceTrait};
use super::records_validation::{validate_new_record, validate_record_update};

/// One repository per record collection.
#[derive(Clone)]
pub struct RecordRepositories {
    pub incomes: Arc<dyn RecordRepositoryTrait>,
    pub expenses: Arc<dyn RecordRepositoryTrait>,
    pub debts: Arc<dyn RecordRepositoryTrait>,
    pub savings: Arc<dyn RecordRepositoryTrait>,
    pub pleasures: Arc<dyn RecordRepositoryTrait>,
}

impl RecordRepositories {
    pub fn for_kind(&self, kind: RecordKind) -> &Arc<dyn RecordRepositoryTrait> {
        match kind {
            RecordKind::Income => &self.incomes,
            RecordKind::Expense => &self.expenses,
            RecordKind::Debt => &self.debts,
            RecordKind::Saving => &self.savings,
            RecordKind::Pleasure => &self.pleasures,
        }
    }
}

pub struct RecordService {
    repositories: RecordRepositories,
    state_cache: Arc<StateCache>,
}

impl RecordService {
    pub fn new(repositories: RecordRepositories, state_cache: Arc<StateCache>) -> Self {
        RecordService {
            repositories,
            state_cache,
        }
    }
}

#[async_trait]
impl RecordServiceTrait for RecordService {
    fn list_records(&self, user_id: &UserId, kind: RecordKind) -> Result<Vec<FinancialRecord>> {
        self.repositories.for_kind(kind).list_for_user(user_id)
    }

    fn get_record(
        &self,
        user_id: &UserId,
        kind: RecordKind,
        record_id: &str,
    ) -> Result<FinancialRecord> {
        self.repositories
            .for_kind(kind)
            .get_for_user(user_id, record_id)
    }

    async fn create_record(
        &self,
        user_id: &UserId,
        kind: RecordKind,
        mut new_record: NewRecord,
    ) -> Result<FinancialRecord> {
        validate_new_record(kind, &new_record)?;
        new_record.name = new_record.name.trim().to_string();

        let created = self
            .repositories
            .for_kind(kind)
            .create(user_id, new_record)
            .await?;
        debug!("Created {} record {} for user {}", kind, created.id, user_id);
        self.state_cache.invalidate(user_id);
        Ok(created)
    }

    async fn update_record(
        &self,
        user_id: &UserId,
        kind: RecordKind,
        record_id: &str,
        update: RecordUpdate,
    ) -> Result<FinancialRecord> {
        let repository = self.repositories.for_kind(kind);
        let existing = repository.get_for_user(user_id, record_id)?;
        validate_record_update(&existing, &update)?;

        let updated = repository.update(update.apply_to(&existing)).await?;
        debug!("Updated {} record {} for user {}", kind, record_id, user_id);
        self.state_cache.invalidate(user_id);
        Ok(updated)
    }

    async fn delete_record(
        &self,
        user_id: &UserId,
        kind: RecordKind,
        record_id: &str,
    ) -> Result<()> {
        let deleted = self
            .repositories
            .for_kind(kind)
            .delete(user_id, record_id)
            .await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "{} record {}",
                kind, record_id
            ))));
        }
        debug!("Deleted {} record {} for user {}", kind, record_id, user_id);
        self.state_cache.invalidate(user_id);
        Ok(())
    }
}
