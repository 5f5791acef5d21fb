//! Records module - the validated monetary record shared by every collection.

mod records_model;
mod records_service;
mod records_traits;
mod records_validation;

pub use records_model::{FinancialRecord, NewRecord, RecordKind, RecordType, RecordUpdate};
pub use records_service::{RecordRepositories, RecordService};
pub use records_traits::{RecordRepositoryTrait, RecordServiceTrait};
pub use records_validation::{validate_new_record, validate_record_update};
