//! Turns raw bucket totals into actual percentages and target comparisons.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::money::{normalize_percentage, percent_of, Money};

use super::budget_rules_model::{
    AllocationBucket, AllocationStatus, BucketComparison, BudgetRule,
};

/// Money assigned to each allocation bucket.
///
/// needs = fixed expenses + debt, wants = variable expenses + pleasure,
/// savings = savings and investments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketAmounts {
    pub needs: Money,
    pub wants: Money,
    pub savings: Money,
}

/// Returns `rule` with its actual percentages recomputed against
/// `total_budget`. Each percentage is rounded on its own, so the three need
/// not add up to exactly 100.
pub fn reconcile(rule: &BudgetRule, buckets: &BucketAmounts, total_budget: Money) -> BudgetRule {
    let mut reconciled = rule.clone();
    reconciled.actual_needs_percentage = percent_of(buckets.needs, total_budget);
    reconciled.actual_wants_percentage = percent_of(buckets.wants, total_budget);
    reconciled.actual_savings_percentage = percent_of(buckets.savings, total_budget);
    reconciled
}

/// Compares each bucket's actual percentage with its target.
pub fn compare(rule: &BudgetRule) -> Vec<BucketComparison> {
    vec![
        comparison(
            AllocationBucket::Needs,
            rule.needs_percentage,
            rule.actual_needs_percentage,
        ),
        comparison(
            AllocationBucket::Wants,
            rule.wants_percentage,
            rule.actual_wants_percentage,
        ),
        comparison(
            AllocationBucket::Savings,
            rule.savings_percentage,
            rule.actual_savings_percentage,
        ),
    ]
}

fn comparison(bucket: AllocationBucket, target: Decimal, actual: Decimal) -> BucketComparison {
    let difference = normalize_percentage(actual - target);
    let status = match difference.cmp(&Decimal::ZERO) {
        Ordering::Less => AllocationStatus::Under,
        Ordering::Equal => AllocationStatus::OnTarget,
        Ordering::Greater => AllocationStatus::Over,
    };
    BucketComparison {
        bucket,
        target_percentage: normalize_percentage(target),
        actual_percentage: normalize_percentage(actual),
        difference,
        status,
    }
}
