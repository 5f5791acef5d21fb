use crate::errors::Result;
use crate::identity::UserId;
use crate::records::records_model::{FinancialRecord, NewRecord, RecordKind, RecordUpdate};
use async_trait::async_trait;

/// Trait for record repository operations.
///
/// One repository instance serves exactly one [`RecordKind`]. Every method is
/// scoped by user; a record owned by someone else behaves as if it did not
/// exist.
#[async_trait]
pub trait RecordRepositoryTrait: Send + Sync {
    fn kind(&self) -> RecordKind;
    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<FinancialRecord>>;
    fn get_for_user(&self, user_id: &UserId, record_id: &str) -> Result<FinancialRecord>;
    async fn create(&self, user_id: &UserId, new_record: NewRecord) -> Result<FinancialRecord>;
    async fn update(&self, record: FinancialRecord) -> Result<FinancialRecord>;
    async fn delete(&self, user_id: &UserId, record_id: &str) -> Result<usize>;
}

/// Trait for record service operations
#[async_trait]
pub trait RecordServiceTrait: Send + Sync {
    fn list_records(&self, user_id: &UserId, kind: RecordKind) -> Result<Vec<FinancialRecord>>;
    fn get_record(
        &self,
        user_id: &UserId,
        kind: RecordKind,
        record_id: &str,
    ) -> Result<FinancialRecord>;
    async fn create_record(
        &self,
        user_id: &UserId,
        kind: RecordKind,
        new_record: NewRecord,
    ) -> Result<FinancialRecord>;
    async fn update_record(
        &self,
        user_id: &UserId,
        kind: RecordKind,
        record_id: &str,
        update: RecordUpdate,
    ) -> Result<FinancialRecord>;
    async fn delete_record(&self, user_id: &UserId, kind: RecordKind, record_id: &str)
        -> Result<()>;
}
