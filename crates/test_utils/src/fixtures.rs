//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the
//! invoicing system. These fixtures are designed to be consistent and
//! predictable for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{Currency, Money, TaxRate};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The standard hourly rate used across scenarios ($50.00)
    pub fn usd_rate() -> Money {
        Money::from_minor(5000, Currency::USD)
    }

    /// A higher override rate ($75.00)
    pub fn usd_override_rate() -> Money {
        Money::from_minor(7500, Currency::USD)
    }

    /// A zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// A Polish-currency rate (400.00 zł)
    pub fn pln_rate() -> Money {
        Money::from_minor(40000, Currency::PLN)
    }
}

/// Fixture for tax rates
pub struct TaxFixtures;

impl TaxFixtures {
    /// The standard Polish VAT rate (23.00%)
    pub fn polish_vat() -> TaxRate {
        TaxRate::from_basis_points(2300)
    }

    /// A US sales-tax style rate (8.25%)
    pub fn us_sales_tax() -> TaxRate {
        TaxRate::from_basis_points(825)
    }

    /// No tax
    pub fn zero() -> TaxRate {
        TaxRate::zero()
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard work/issue date (Jan 1, 2025)
    pub fn work_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    /// Standard due date two weeks later
    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    /// Fixed generation timestamp for deterministic footers
    pub fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 30, 42).unwrap()
    }
}

/// Fixture for recurring strings
pub struct StringFixtures;

impl StringFixtures {
    /// First generated invoice number of the standard work date
    pub fn first_invoice_number() -> &'static str {
        "INV-20250101-001"
    }

    /// A typical hours-flavoured line description
    pub fn hours_description() -> &'static str {
        "Consulting hours"
    }
}
