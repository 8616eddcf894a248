//! Row-to-domain conversion helpers
//!
//! SQLite has no native UUID, decimal, or enum types; identifiers persist
//! as text, decimal quantities as text, and money as integer minor units.
//! Every decode failure surfaces as `DatabaseError::Serialization`.

use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use core_kernel::Currency;
use domain_billing::InvoiceStatus;

use crate::error::DatabaseError;

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(value)
        .map_err(|e| DatabaseError::serialization(format!("invalid uuid '{value}': {e}")))
}

pub(crate) fn parse_currency(code: &str) -> Result<Currency, DatabaseError> {
    Currency::from_code(code)
        .ok_or_else(|| DatabaseError::serialization(format!("unknown currency code '{code}'")))
}

pub(crate) fn parse_decimal(value: &str) -> Result<Decimal, DatabaseError> {
    Decimal::from_str(value)
        .map_err(|e| DatabaseError::serialization(format!("invalid decimal '{value}': {e}")))
}

pub(crate) fn parse_status(value: &str) -> Result<InvoiceStatus, DatabaseError> {
    InvoiceStatus::parse(value)
        .ok_or_else(|| DatabaseError::serialization(format!("unknown invoice status '{value}'")))
}
