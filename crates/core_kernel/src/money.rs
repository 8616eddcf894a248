//! Money types for minor-unit currency arithmetic
//!
//! This module provides a type-safe representation of monetary values.
//! Amounts are stored as integer minor units (cents) so that stored and
//! transmitted values are exact; fractional arithmetic (hours × rate,
//! basis-point tax application) goes through `rust_decimal` and is rounded
//! half-away-from-zero back to minor units at the boundary.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    PLN,
    CHF,
    JPY,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::PLN => "zł",
            Currency::CHF => "CHF",
            Currency::JPY => "¥",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::PLN => "PLN",
            Currency::CHF => "CHF",
            Currency::JPY => "JPY",
        }
    }

    /// Parses an ISO 4217 code
    pub fn from_code(code: &str) -> Option<Currency> {
        match code {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "PLN" => Some(Currency::PLN),
            "CHF" => Some(Currency::CHF),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid tax rate: {0}")]
    InvalidRate(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// Rounds a decimal to the nearest integer, half away from zero.
///
/// Every fractional-to-minor-unit conversion in the system funnels through
/// this function so the rounding mode is a single decision point.
pub fn round_to_minor(value: Decimal) -> Result<i64, MoneyError> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(MoneyError::Overflow)
}

/// A monetary amount in integer minor units with associated currency
///
/// All stored and transmitted amounts are exact integer minor units (e.g.
/// cents). Arithmetic across amounts stays in integers; only quantity and
/// rate application pass through `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    minor: i64,
    currency: Currency,
}

impl Money {
    /// Creates Money from an integer amount in minor units (e.g., cents)
    pub fn from_minor(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self { minor: 0, currency }
    }

    /// Returns the amount in minor units
    pub fn minor(&self) -> i64 {
        self.minor
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the amount as a decimal in major units (e.g., 10050 → 100.50)
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.minor, self.currency.decimal_places())
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.minor == 0
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.minor > 0
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.minor < 0
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self {
            minor: self.minor.abs(),
            currency: self.currency,
        }
    }

    /// Checked addition that returns an error on currency mismatch or overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let minor = self
            .minor
            .checked_add(other.minor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::from_minor(minor, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch or overflow
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let minor = self
            .minor
            .checked_sub(other.minor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::from_minor(minor, self.currency))
    }

    /// Multiplies this amount, taken as a unit price, by a fractional
    /// quantity and rounds back to minor units.
    ///
    /// This is the line-total rule: `round(quantity × unit_price)`.
    pub fn multiply_quantity(&self, quantity: Decimal) -> Result<Money, MoneyError> {
        let product = Decimal::from(self.minor)
            .checked_mul(quantity)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::from_minor(round_to_minor(product)?, self.currency))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{}{:.dp$}",
            self.currency.symbol(),
            self.to_decimal(),
            dp = dp as usize
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch or overflow in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch or overflow in Money::sub")
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_minor(-self.minor, self.currency)
    }
}

/// A tax rate stored as integer basis points (hundredths of a percent)
///
/// 2300 basis points = 23.00%. Storing the rate as an integer keeps stored
/// invoices free of rounding drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate {
    basis_points: i64,
}

impl TaxRate {
    /// Creates a rate from basis points (e.g., 2300 for 23.00%)
    pub fn from_basis_points(basis_points: i64) -> Self {
        Self { basis_points }
    }

    /// Creates a rate from a percentage with two-decimal precision
    /// (e.g., 23.00 for 23.00%)
    pub fn from_percentage(percentage: Decimal) -> Result<Self, MoneyError> {
        let bp = percentage
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(MoneyError::Overflow)?;
        let bp = round_to_minor(bp).map_err(|_| MoneyError::InvalidRate(percentage.to_string()))?;
        Ok(Self { basis_points: bp })
    }

    /// The zero rate
    pub fn zero() -> Self {
        Self { basis_points: 0 }
    }

    /// Returns the rate in basis points
    pub fn basis_points(&self) -> i64 {
        self.basis_points
    }

    /// Returns the rate as a percentage (e.g., 23.00)
    pub fn as_percentage(&self) -> Decimal {
        Decimal::new(self.basis_points, 2)
    }

    /// Returns true if this is the zero rate
    pub fn is_zero(&self) -> bool {
        self.basis_points == 0
    }

    /// Applies this rate to an amount: `round(amount × basis_points / 10000)`
    pub fn apply(&self, amount: Money) -> Result<Money, MoneyError> {
        let scaled = Decimal::from(amount.minor())
            .checked_mul(Decimal::from(self.basis_points))
            .ok_or(MoneyError::Overflow)?
            / Decimal::from(10_000);
        Ok(Money::from_minor(round_to_minor(scaled)?, amount.currency()))
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    proptest! {
        #[test]
        fn money_addition_is_commutative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::from_minor(a, Currency::USD);
            let mb = Money::from_minor(b, Currency::USD);

            prop_assert_eq!(ma + mb, mb + ma);
        }

        #[test]
        fn tax_never_exceeds_amount_for_sub_100_percent_rates(
            amount in 0i64..1_000_000_000i64,
            bp in 0i64..10_000i64
        ) {
            let money = Money::from_minor(amount, Currency::USD);
            let tax = TaxRate::from_basis_points(bp).apply(money).unwrap();

            prop_assert!(tax.minor() <= money.minor());
            prop_assert!(tax.minor() >= 0);
        }

        #[test]
        fn quantity_multiplication_stays_within_half_cent_of_exact(
            rate in 0i64..1_000_000i64,
            hundredths in 1i64..100_000i64
        ) {
            let quantity = Decimal::new(hundredths, 2);
            let unit = Money::from_minor(rate, Currency::USD);
            let total = unit.multiply_quantity(quantity).unwrap();

            let exact = Decimal::from(rate) * quantity;
            let diff = (Decimal::from(total.minor()) - exact).abs();
            prop_assert!(diff <= Decimal::new(5, 1));
        }
    }
}
