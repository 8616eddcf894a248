//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data that
//! maintains domain invariants.

use chrono::NaiveDate;
use core_kernel::{Currency, Money, TaxRate};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::PLN),
        Just(Currency::CHF),
        Just(Currency::JPY),
    ]
}

/// Strategy for generating non-negative amounts in minor units
pub fn amount_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..1_000_000_000i64
}

/// Strategy for generating non-negative Money values
pub fn money_strategy() -> impl Strategy<Value = Money> {
    (amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating hourly rates in minor units (up to 10,000.00)
pub fn rate_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..1_000_000i64
}

/// Strategy for generating positive hours with two-decimal precision
/// (0.01 to 100.00)
pub fn hours_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000i64).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

/// Strategy for generating tax rates from 0% to 100% in basis points
pub fn tax_rate_strategy() -> impl Strategy<Value = TaxRate> {
    (0i64..10_000i64).prop_map(TaxRate::from_basis_points)
}

/// Strategy for generating work dates within 2024-2025
pub fn work_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..730i64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(offset as u64))
            .unwrap()
    })
}
