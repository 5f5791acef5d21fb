//! Conversions between domain values and their TEXT column form.
//!
//! Money and percentages are stored as decimal strings with two fractional
//! digits so the database never holds a binary float.

use std::str::FromStr;

use budgetly_core::money::{normalize_percentage, Money};
use budgetly_core::Result;
use rust_decimal::Decimal;

use crate::errors::StorageError;

pub fn money_to_text(value: Money) -> String {
    value.to_string()
}

pub fn parse_money(column: &'static str, text: &str) -> Result<Money> {
    Money::from_str(text).map_err(|e| corrupt(column, text, e))
}

pub fn parse_optional_money(column: &'static str, text: Option<&str>) -> Result<Option<Money>> {
    text.map(|t| parse_money(column, t)).transpose()
}

pub fn percentage_to_text(value: Decimal) -> String {
    normalize_percentage(value).to_string()
}

pub fn parse_percentage(column: &'static str, text: &str) -> Result<Decimal> {
    Decimal::from_str(text)
        .map(normalize_percentage)
        .map_err(|e| corrupt(column, text, e))
}

/// Parses any `FromStr` enum column (record kind, record type).
pub fn parse_column<T>(column: &'static str, text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(text).map_err(|e| corrupt(column, text, e))
}

fn corrupt(column: &'static str, text: &str, err: impl std::fmt::Display) -> budgetly_core::Error {
    StorageError::CorruptValue {
        column,
        detail: format!("'{}': {}", text, err),
    }
    .into()
}
