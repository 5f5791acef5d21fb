use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use budgetly_core::errors::{DatabaseError, Error, Result};
use budgetly_core::identity::UserId;
use budgetly_core::records::{
    FinancialRecord, NewRecord, RecordKind, RecordRepositories, RecordRepositoryTrait,
};

use super::model::RecordDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::financial_records;
use crate::schema::financial_records::dsl::*;

/// Repository for one record collection. Every query is filtered by both
/// owner and kind.
pub struct RecordRepository {
    record_kind: RecordKind,
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RecordRepository {
    pub fn new(record_kind: RecordKind, pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        RecordRepository {
            record_kind,
            pool,
            writer,
        }
    }

    fn not_found(record_kind: RecordKind, record_id: &str) -> Error {
        Error::Database(DatabaseError::NotFound(format!(
            "{} record {}",
            record_kind, record_id
        )))
    }
}

/// Builds one repository per collection, all sharing the pool and writer.
pub fn record_repositories(pool: Arc<DbPool>, writer: WriteHandle) -> RecordRepositories {
    let repository = |record_kind: RecordKind| -> Arc<dyn RecordRepositoryTrait> {
        Arc::new(RecordRepository::new(
            record_kind,
            pool.clone(),
            writer.clone(),
        ))
    };
    RecordRepositories {
        incomes: repository(RecordKind::Income),
        expenses: repository(RecordKind::Expense),
        debts: repository(RecordKind::Debt),
        savings: repository(RecordKind::Saving),
        pleasures: repository(RecordKind::Pleasure),
    }
}

#[async_trait]
impl RecordRepositoryTrait for RecordRepository {
    fn kind(&self) -> RecordKind {
        self.record_kind
    }

    fn list_for_user(&self, owner: &UserId) -> Result<Vec<FinancialRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = financial_records
            .filter(user_id.eq(owner.as_str()))
            .filter(kind.eq(self.record_kind.as_str()))
            .order((created_at.asc(), id.asc()))
            .select(RecordDB::as_select())
            .load::<RecordDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(FinancialRecord::try_from).collect()
    }

    fn get_for_user(&self, owner: &UserId, record_id: &str) -> Result<FinancialRecord> {
        let mut conn = get_connection(&self.pool)?;
        financial_records
            .filter(id.eq(record_id))
            .filter(user_id.eq(owner.as_str()))
            .filter(kind.eq(self.record_kind.as_str()))
            .select(RecordDB::as_select())
            .first::<RecordDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Self::not_found(self.record_kind, record_id))
            .and_then(FinancialRecord::try_from)
    }

    async fn create(&self, owner: &UserId, new_record: NewRecord) -> Result<FinancialRecord> {
        let now = Utc::now().naive_utc();
        let record = FinancialRecord {
            id: Uuid::new_v4().to_string(),
            user_id: owner.clone(),
            kind: self.record_kind,
            name: new_record.name,
            amount: new_record.amount,
            category_id: new_record.category_id,
            record_type: new_record.record_type,
            due_amount: new_record.due_amount,
            created_at: now,
            updated_at: now,
        };
        let row = RecordDB::from(&record);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FinancialRecord> {
                let inserted = diesel::insert_into(financial_records::table)
                    .values(&row)
                    .returning(RecordDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                FinancialRecord::try_from(inserted)
            })
            .await
    }

    async fn update(&self, record: FinancialRecord) -> Result<FinancialRecord> {
        let record_kind = self.record_kind;
        if record.kind != record_kind {
            return Err(Self::not_found(record_kind, &record.id));
        }
        let row = RecordDB::from(&record);
        let now = Utc::now().naive_utc();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FinancialRecord> {
                let target = financial_records
                    .filter(id.eq(&row.id))
                    .filter(user_id.eq(&row.user_id))
                    .filter(kind.eq(&row.kind));
                let updated = diesel::update(target)
                    .set((
                        name.eq(&row.name),
                        amount.eq(&row.amount),
                        category_id.eq(&row.category_id),
                        record_type.eq(&row.record_type),
                        due_amount.eq(&row.due_amount),
                        updated_at.eq(now),
                    ))
                    .returning(RecordDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Self::not_found(record_kind, &row.id))?;
                FinancialRecord::try_from(updated)
            })
            .await
    }

    async fn delete(&self, owner: &UserId, record_id: &str) -> Result<usize> {
        let owner = owner.as_str().to_string();
        let record_id = record_id.to_string();
        let record_kind = self.record_kind.as_str();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    financial_records
                        .filter(id.eq(record_id))
                        .filter(user_id.eq(owner))
                        .filter(kind.eq(record_kind)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
