//! Ingestion checks shared by every record kind.
//!
//! Records that pass these checks are safe to hand to the aggregator.

use crate::constants::MAX_RECORD_NAME_LEN;
use crate::errors::{Error, Result};
use crate::money::Money;

use super::records_model::{FinancialRecord, NewRecord, RecordKind, RecordType, RecordUpdate};

const MIN_AMOUNT: Money = Money::from_cents(1);

pub fn validate_new_record(kind: RecordKind, input: &NewRecord) -> Result<()> {
    validate_shape(
        kind,
        &input.name,
        input.amount,
        input.record_type,
        input.due_amount,
    )
}

/// Validates the record as it would look after `update` is applied.
pub fn validate_record_update(existing: &FinancialRecord, update: &RecordUpdate) -> Result<()> {
    let merged = update.apply_to(existing);
    validate_shape(
        merged.kind,
        &merged.name,
        merged.amount,
        merged.record_type,
        merged.due_amount,
    )
}

fn validate_shape(
    kind: RecordKind,
    name: &str,
    amount: Money,
    record_type: Option<RecordType>,
    due_amount: Option<Money>,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid(kind, "name must not be empty"));
    }
    if name.chars().count() > MAX_RECORD_NAME_LEN {
        return Err(invalid(
            kind,
            &format!("name must be at most {} characters", MAX_RECORD_NAME_LEN),
        ));
    }

    if amount < MIN_AMOUNT {
        return Err(invalid(
            kind,
            &format!("amount must be at least {}, got {}", MIN_AMOUNT, amount),
        ));
    }

    let allowed = kind.allowed_types();
    match record_type {
        None if !allowed.is_empty() => {
            return Err(invalid(
                kind,
                &format!("type is required and must be one of {}", join_types(allowed)),
            ));
        }
        Some(t) if allowed.is_empty() => {
            return Err(invalid(kind, &format!("type '{}' is not allowed", t)));
        }
        Some(t) if !allowed.contains(&t) => {
            return Err(invalid(
                kind,
                &format!("type '{}' must be one of {}", t, join_types(allowed)),
            ));
        }
        _ => {}
    }

    if let Some(due) = due_amount {
        if kind != RecordKind::Debt {
            return Err(invalid(kind, "dueAmount is only allowed on debts"));
        }
        if due.is_negative() {
            return Err(invalid(kind, "dueAmount must not be negative"));
        }
    }

    Ok(())
}

fn join_types(types: &[RecordType]) -> String {
    types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn invalid(kind: RecordKind, detail: &str) -> Error {
    Error::InvalidRecord(format!("{}: {}", kind, detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::identity::UserId;

    fn new_record(amount_cents: i64, record_type: Option<RecordType>) -> NewRecord {
        NewRecord {
            name: "Rent".to_string(),
            amount: Money::from_cents(amount_cents),
            category_id: None,
            record_type,
            due_amount: None,
        }
    }

    #[test]
    fn accepts_minimum_amount() {
        assert!(validate_new_record(RecordKind::Income, &new_record(1, None)).is_ok());
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        for cents in [0, -1, -10_000] {
            let err = validate_new_record(RecordKind::Pleasure, &new_record(cents, None))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidRecord(_)), "{cents}");
        }
    }

    #[test]
    fn rejects_blank_and_long_names() {
        let mut input = new_record(100, None);
        input.name = "   ".to_string();
        assert!(validate_new_record(RecordKind::Income, &input).is_err());

        input.name = "x".repeat(MAX_RECORD_NAME_LEN + 1);
        assert!(validate_new_record(RecordKind::Income, &input).is_err());
    }

    #[test]
    fn expense_requires_fixed_or_variable() {
        assert!(validate_new_record(RecordKind::Expense, &new_record(100, None)).is_err());
        assert!(
            validate_new_record(RecordKind::Expense, &new_record(100, Some(RecordType::Invest)))
                .is_err()
        );
        assert!(
            validate_new_record(RecordKind::Expense, &new_record(100, Some(RecordType::Fixed)))
                .is_ok()
        );
    }

    #[test]
    fn saving_requires_invest_or_saving() {
        assert!(
            validate_new_record(RecordKind::Saving, &new_record(100, Some(RecordType::Variable)))
                .is_err()
        );
        assert!(
            validate_new_record(RecordKind::Saving, &new_record(100, Some(RecordType::Invest)))
                .is_ok()
        );
    }

    #[test]
    fn other_kinds_reject_a_type() {
        assert!(
            validate_new_record(RecordKind::Debt, &new_record(100, Some(RecordType::Fixed)))
                .is_err()
        );
    }

    #[test]
    fn due_amount_only_on_debts() {
        let mut input = new_record(100, None);
        input.due_amount = Some(Money::from_cents(5_000));
        assert!(validate_new_record(RecordKind::Debt, &input).is_ok());
        assert!(validate_new_record(RecordKind::Income, &input).is_err());

        input.due_amount = Some(Money::from_cents(-1));
        assert!(validate_new_record(RecordKind::Debt, &input).is_err());
    }

    #[test]
    fn update_is_validated_against_merged_record() {
        let now = NaiveDateTime::default();
        let existing = FinancialRecord {
            id: "r1".to_string(),
            user_id: UserId::from("u1"),
            kind: RecordKind::Expense,
            name: "Groceries".to_string(),
            amount: Money::from_cents(15_000),
            category_id: None,
            record_type: Some(RecordType::Variable),
            due_amount: None,
            created_at: now,
            updated_at: now,
        };

        let rename = RecordUpdate {
            name: Some("Food".to_string()),
            ..Default::default()
        };
        assert!(validate_record_update(&existing, &rename).is_ok());

        let bad_type = RecordUpdate {
            record_type: Some(RecordType::Saving),
            ..Default::default()
        };
        assert!(validate_record_update(&existing, &bad_type).is_err());
    }
}
