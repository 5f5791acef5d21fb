//! Fixed-point money and percentage helpers.
//!
//! Amounts are held as integer cents so sums never drift. `Decimal` is only
//! used at the edges (parsing, display, percentages).

use std::fmt;
use std::str::FromStr;

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{MONEY_SCALE, PERCENT_SCALE};
use crate::errors::ValidationError;

/// A monetary amount in integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a decimal into cents, rejecting sub-cent precision.
    pub fn from_decimal(value: Decimal) -> Result<Self, ValidationError> {
        if value.normalize().scale() > MONEY_SCALE {
            return Err(ValidationError::InvalidAmount(format!(
                "{} has more than {} decimal places",
                value, MONEY_SCALE
            )));
        }
        let cents = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| c.to_i64())
            .ok_or_else(|| ValidationError::InvalidAmount(format!("{} is out of range", value)))?;
        Ok(Money(cents))
    }

    /// Decimal form, always with two fractional digits.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, MONEY_SCALE)
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())?;
        Money::from_decimal(value)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal amount with at most two fractional digits")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::from_str(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Money::from_decimal(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Money::from_decimal(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        // Display gives the shortest round-trip form, so 12.3 stays 12.3.
        Money::from_str(&v.to_string()).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// `100 * part / whole`, rounded half-up to two places.
///
/// Returns `0.00` when `whole` is zero.
pub fn percent_of(part: Money, whole: Money) -> Decimal {
    if whole.cents() == 0 {
        return Decimal::new(0, PERCENT_SCALE);
    }
    let ratio = Decimal::from(part.cents()) * Decimal::ONE_HUNDRED / Decimal::from(whole.cents());
    normalize_percentage(ratio)
}

/// Rounds half-up (away from zero) and pins the scale to two digits.
pub fn normalize_percentage(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PERCENT_SCALE);
    rounded
}
