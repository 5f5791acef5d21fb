//! Pure aggregation of a user's records into a [`State`].
//!
//! No I/O happens here. Given the same inputs the output is identical, and
//! the order of records inside each collection does not matter.

use crate::budget_rules::{compare, reconcile, BucketAmounts, BudgetRule};
use crate::errors::{Error, Result};
use crate::identity::UserId;
use crate::money::Money;
use crate::records::{FinancialRecord, RecordKind, RecordType};

use super::state_model::{RecordSet, State};

/// Builds the snapshot for `user_id`.
///
/// Fails with `MissingConfiguration` when `budget_rule` is `None`. Records
/// are expected to have passed ingestion validation; anything that slips
/// through (foreign owner, wrong collection, missing discriminator, cent
/// overflow) is reported as `Computation`.
pub fn compute_state(
    user_id: &UserId,
    budget_rule: Option<&BudgetRule>,
    records: &RecordSet,
    currency: &str,
) -> Result<State> {
    let rule = budget_rule.ok_or_else(|| {
        Error::MissingConfiguration(format!("no budget rule configured for user {}", user_id))
    })?;
    if rule.user_id != *user_id {
        return Err(Error::Computation(format!(
            "budget rule {} belongs to another user",
            rule.id
        )));
    }

    let total_budget = sum(user_id, RecordKind::Income, &records.incomes)?;

    let mut total_fixed = Money::ZERO;
    let mut total_variable = Money::ZERO;
    for record in &records.expenses {
        check_record(user_id, RecordKind::Expense, record)?;
        match record.record_type {
            Some(RecordType::Fixed) => total_fixed = add(total_fixed, record.amount)?,
            Some(RecordType::Variable) => total_variable = add(total_variable, record.amount)?,
            other => return Err(bad_type(record, other)),
        }
    }

    let total_debt = sum(user_id, RecordKind::Debt, &records.debts)?;

    let mut savings = Money::ZERO;
    for record in &records.savings {
        check_record(user_id, RecordKind::Saving, record)?;
        match record.record_type {
            Some(RecordType::Saving) | Some(RecordType::Invest) => {
                savings = add(savings, record.amount)?
            }
            other => return Err(bad_type(record, other)),
        }
    }

    let total_pleasure = sum(user_id, RecordKind::Pleasure, &records.pleasures)?;

    let outflows = [total_variable, total_debt, savings, total_pleasure]
        .into_iter()
        .try_fold(total_fixed, add)?;
    let remains_budget = total_budget
        .checked_sub(outflows)
        .ok_or_else(|| overflow("remaining budget"))?;

    let buckets = BucketAmounts {
        needs: add(total_fixed, total_debt)?,
        wants: add(total_variable, total_pleasure)?,
        savings,
    };
    let budget_rule = reconcile(rule, &buckets, total_budget);
    let allocations = compare(&budget_rule);

    Ok(State {
        currency: currency.to_string(),
        total_budget,
        total_fixed,
        total_variable,
        total_debt,
        savings,
        total_pleasure,
        remains_budget,
        budget_rule,
        allocations,
    })
}

fn sum(user_id: &UserId, kind: RecordKind, records: &[FinancialRecord]) -> Result<Money> {
    records.iter().try_fold(Money::ZERO, |acc, record| {
        check_record(user_id, kind, record)?;
        add(acc, record.amount)
    })
}

fn check_record(user_id: &UserId, kind: RecordKind, record: &FinancialRecord) -> Result<()> {
    if record.user_id != *user_id {
        return Err(Error::Computation(format!(
            "record {} does not belong to user {}",
            record.id, user_id
        )));
    }
    if record.kind != kind {
        return Err(Error::Computation(format!(
            "{} record {} found among {} records",
            record.kind,
            record.id,
            kind.as_str()
        )));
    }
    Ok(())
}

fn add(a: Money, b: Money) -> Result<Money> {
    a.checked_add(b).ok_or_else(|| overflow("total"))
}

fn overflow(what: &str) -> Error {
    Error::Computation(format!("{} overflowed", what))
}

fn bad_type(record: &FinancialRecord, record_type: Option<RecordType>) -> Error {
    let shown = record_type.map(|t| t.as_str()).unwrap_or("none");
    Error::Computation(format!(
        "{} record {} has unsupported type '{}'",
        record.kind, record.id, shown
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget_rules::AllocationStatus;
    use crate::testing::{default_rule, record};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn scenario(user: &UserId) -> RecordSet {
        RecordSet {
            incomes: vec![record(user, RecordKind::Income, 100_000, None)],
            expenses: vec![
                record(user, RecordKind::Expense, 30_000, Some(RecordType::Fixed)),
                record(user, RecordKind::Expense, 15_000, Some(RecordType::Variable)),
            ],
            debts: vec![record(user, RecordKind::Debt, 10_000, None)],
            savings: vec![record(user, RecordKind::Saving, 5_000, Some(RecordType::Saving))],
            pleasures: vec![record(user, RecordKind::Pleasure, 2_500, None)],
        }
    }

    #[test]
    fn computes_reference_scenario() {
        let user = UserId::from("u1");
        let rule = default_rule(&user);
        let state = compute_state(&user, Some(&rule), &scenario(&user), "USD").unwrap();

        assert_eq!(state.currency, "USD");
        assert_eq!(state.total_budget.to_string(), "1000.00");
        assert_eq!(state.total_fixed.to_string(), "300.00");
        assert_eq!(state.total_variable.to_string(), "150.00");
        assert_eq!(state.total_debt.to_string(), "100.00");
        assert_eq!(state.savings.to_string(), "50.00");
        assert_eq!(state.total_pleasure.to_string(), "25.00");
        assert_eq!(state.remains_budget.to_string(), "375.00");

        assert_eq!(state.budget_rule.actual_needs_percentage.to_string(), "40.00");
        assert_eq!(state.budget_rule.actual_wants_percentage.to_string(), "17.50");
        assert_eq!(state.budget_rule.actual_savings_percentage.to_string(), "5.00");

        assert_eq!(state.allocations[0].status, AllocationStatus::Under);
        assert_eq!(state.allocations[2].difference.to_string(), "-15.00");
    }

    #[test]
    fn empty_records_give_zero_state() {
        let user = UserId::from("u1");
        let rule = default_rule(&user);
        let state = compute_state(&user, Some(&rule), &RecordSet::default(), "EUR").unwrap();

        assert_eq!(state.total_budget, Money::ZERO);
        assert_eq!(state.remains_budget, Money::ZERO);
        assert_eq!(state.budget_rule.actual_needs_percentage, Decimal::ZERO);
        assert_eq!(state.budget_rule.actual_wants_percentage, Decimal::ZERO);
        assert_eq!(state.budget_rule.actual_savings_percentage, Decimal::ZERO);
        assert_eq!(state.currency, "EUR");
    }

    #[test]
    fn overspending_is_not_clamped() {
        let user = UserId::from("u1");
        let rule = default_rule(&user);
        let records = RecordSet {
            incomes: vec![record(&user, RecordKind::Income, 10_000, None)],
            expenses: vec![record(
                &user,
                RecordKind::Expense,
                50_000,
                Some(RecordType::Fixed),
            )],
            ..Default::default()
        };
        let state = compute_state(&user, Some(&rule), &records, "USD").unwrap();
        assert_eq!(state.remains_budget.to_string(), "-400.00");
        assert_eq!(state.budget_rule.actual_needs_percentage.to_string(), "500.00");
    }

    #[test]
    fn invest_counts_as_savings() {
        let user = UserId::from("u1");
        let rule = default_rule(&user);
        let records = RecordSet {
            incomes: vec![record(&user, RecordKind::Income, 100_000, None)],
            savings: vec![
                record(&user, RecordKind::Saving, 5_000, Some(RecordType::Saving)),
                record(&user, RecordKind::Saving, 7_500, Some(RecordType::Invest)),
            ],
            ..Default::default()
        };
        let state = compute_state(&user, Some(&rule), &records, "USD").unwrap();
        assert_eq!(state.savings.to_string(), "125.00");
        assert_eq!(state.budget_rule.actual_savings_percentage.to_string(), "12.50");
    }

    #[test]
    fn debt_due_amount_is_ignored() {
        let user = UserId::from("u1");
        let rule = default_rule(&user);
        let mut loan = record(&user, RecordKind::Debt, 10_000, None);
        loan.due_amount = Some(Money::from_cents(5_000_000));
        let records = RecordSet {
            debts: vec![loan],
            ..Default::default()
        };
        let state = compute_state(&user, Some(&rule), &records, "USD").unwrap();
        assert_eq!(state.total_debt.to_string(), "100.00");
    }

    #[test]
    fn missing_rule_is_missing_configuration() {
        let user = UserId::from("u1");
        let err = compute_state(&user, None, &scenario(&user), "USD").unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration(_)));
    }

    #[test]
    fn foreign_records_are_rejected() {
        let user = UserId::from("u1");
        let other = UserId::from("u2");
        let rule = default_rule(&user);
        let records = RecordSet {
            incomes: vec![record(&other, RecordKind::Income, 100, None)],
            ..Default::default()
        };
        let err = compute_state(&user, Some(&rule), &records, "USD").unwrap_err();
        assert!(matches!(err, Error::Computation(_)));

        let foreign_rule = default_rule(&other);
        let err = compute_state(&user, Some(&foreign_rule), &RecordSet::default(), "USD")
            .unwrap_err();
        assert!(matches!(err, Error::Computation(_)));
    }

    #[test]
    fn misplaced_or_untyped_records_are_rejected() {
        let user = UserId::from("u1");
        let rule = default_rule(&user);

        let misplaced = RecordSet {
            debts: vec![record(&user, RecordKind::Pleasure, 100, None)],
            ..Default::default()
        };
        assert!(matches!(
            compute_state(&user, Some(&rule), &misplaced, "USD"),
            Err(Error::Computation(_))
        ));

        let untyped = RecordSet {
            expenses: vec![record(&user, RecordKind::Expense, 100, None)],
            ..Default::default()
        };
        assert!(matches!(
            compute_state(&user, Some(&rule), &untyped, "USD"),
            Err(Error::Computation(_))
        ));
    }

    #[test]
    fn overflow_is_a_computation_error() {
        let user = UserId::from("u1");
        let rule = default_rule(&user);
        let records = RecordSet {
            incomes: vec![
                record(&user, RecordKind::Income, i64::MAX, None),
                record(&user, RecordKind::Income, 1, None),
            ],
            ..Default::default()
        };
        assert!(matches!(
            compute_state(&user, Some(&rule), &records, "USD"),
            Err(Error::Computation(_))
        ));
    }

    #[test]
    fn repeated_computation_is_identical() {
        let user = UserId::from("u1");
        let rule = default_rule(&user);
        let records = scenario(&user);
        let first = compute_state(&user, Some(&rule), &records, "USD").unwrap();
        let second = compute_state(&user, Some(&rule), &records, "USD").unwrap();
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    fn amounts() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(1i64..10_000_000, 0..8)
    }

    fn build(user: &UserId, kind: RecordKind, cents: &[i64], types: &[RecordType]) -> Vec<FinancialRecord> {
        cents
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let record_type = if types.is_empty() {
                    None
                } else {
                    Some(types[i % types.len()])
                };
                record(user, kind, *c, record_type)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn remains_budget_identity_holds(
            incomes in amounts(),
            expenses in amounts(),
            debts in amounts(),
            savings in amounts(),
            pleasures in amounts(),
        ) {
            let user = UserId::from("u1");
            let rule = default_rule(&user);
            let records = RecordSet {
                incomes: build(&user, RecordKind::Income, &incomes, &[]),
                expenses: build(&user, RecordKind::Expense, &expenses, &[RecordType::Fixed, RecordType::Variable]),
                debts: build(&user, RecordKind::Debt, &debts, &[]),
                savings: build(&user, RecordKind::Saving, &savings, &[RecordType::Saving, RecordType::Invest]),
                pleasures: build(&user, RecordKind::Pleasure, &pleasures, &[]),
            };
            let state = compute_state(&user, Some(&rule), &records, "USD").unwrap();
            let expected = state.total_budget.cents()
                - state.total_fixed.cents()
                - state.total_variable.cents()
                - state.total_debt.cents()
                - state.savings.cents()
                - state.total_pleasure.cents();
            prop_assert_eq!(state.remains_budget.cents(), expected);
            prop_assert_eq!(state.total_budget.cents(), incomes.iter().sum::<i64>());
        }

        #[test]
        fn permuting_records_gives_identical_state(
            incomes in amounts(),
            expenses in amounts(),
            pleasures in amounts(),
            seed in any::<u64>(),
        ) {
            let user = UserId::from("u1");
            let rule = default_rule(&user);
            let records = RecordSet {
                incomes: build(&user, RecordKind::Income, &incomes, &[]),
                expenses: build(&user, RecordKind::Expense, &expenses, &[RecordType::Fixed, RecordType::Variable]),
                pleasures: build(&user, RecordKind::Pleasure, &pleasures, &[]),
                ..Default::default()
            };
            let mut permuted = records.clone();
            rotate(&mut permuted.incomes, seed);
            rotate(&mut permuted.expenses, seed / 3);
            permuted.pleasures.reverse();

            let a = compute_state(&user, Some(&rule), &records, "USD").unwrap();
            let b = compute_state(&user, Some(&rule), &permuted, "USD").unwrap();
            prop_assert_eq!(a, b);
        }
    }

    fn rotate<T>(items: &mut [T], seed: u64) {
        if !items.is_empty() {
            let by = (seed % items.len() as u64) as usize;
            items.rotate_left(by);
        }
    }
}
