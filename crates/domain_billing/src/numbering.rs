//! Invoice numbering
//!
//! Default invoice numbers are date-scoped: `INV-YYYYMMDD-NNN` with a
//! three-digit, zero-padded sequence. The next sequence is found by scanning
//! the numbers already persisted under today's prefix; if that lookup fails
//! the generator falls back to a timestamp-derived number rather than
//! blocking the caller. Both paths are explicit and separately testable.
//!
//! The store's uniqueness constraint on `invoice_number` remains the actual
//! safety net: two callers racing the scan can still pick the same sequence,
//! and the loser gets a distinct duplicate-number error to retry with.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::warn;

/// Prefix shared by all generated invoice numbers
pub const NUMBER_PREFIX: &str = "INV";

/// Lookup failure from an [`InvoiceNumberSource`]
#[derive(Debug, Error)]
#[error("invoice number lookup failed: {0}")]
pub struct LookupError(pub String);

/// Source of already-persisted invoice numbers
///
/// Implemented by the invoice repository; tests substitute mocks to drive
/// the primary and fallback generation paths independently.
#[async_trait]
pub trait InvoiceNumberSource: Send + Sync {
    /// Returns all existing invoice numbers starting with `prefix`
    async fn numbers_with_prefix(&self, prefix: &str) -> Result<Vec<String>, LookupError>;
}

#[async_trait]
impl<T: InvoiceNumberSource + ?Sized> InvoiceNumberSource for &T {
    async fn numbers_with_prefix(&self, prefix: &str) -> Result<Vec<String>, LookupError> {
        (**self).numbers_with_prefix(prefix).await
    }
}

/// Returns the date-scoped prefix, e.g. `INV-20250101`
pub fn date_prefix(date: NaiveDate) -> String {
    format!("{}-{}", NUMBER_PREFIX, date.format("%Y%m%d"))
}

/// Computes the next number in the date-scoped sequence.
///
/// Numbers not sharing the date prefix are ignored. Of the rest, the numeric
/// suffix after the final `-` is taken; non-numeric suffixes are skipped
/// (never an error). The new suffix is the maximum plus one, or 1 when the
/// bucket is empty, zero-padded to three digits.
pub fn next_in_sequence<'a>(
    date: NaiveDate,
    existing: impl IntoIterator<Item = &'a str>,
) -> String {
    let prefix = date_prefix(date);

    let max_sequence = existing
        .into_iter()
        .filter(|number| number.starts_with(&prefix))
        .filter_map(|number| number.rsplit('-').next())
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max();

    let next = max_sequence.map_or(1, |max| max + 1);
    format!("{prefix}-{next:03}")
}

/// Produces a timestamp-derived fallback number, e.g. `INV-20250101093042`.
///
/// Used when the sequence lookup fails: uniqueness-by-construction is traded
/// for uniqueness-by-entropy so number generation never blocks the caller.
pub fn fallback_number(at: DateTime<Utc>) -> String {
    format!("{}-{}", NUMBER_PREFIX, at.format("%Y%m%d%H%M%S"))
}

/// Two-path invoice number generator
///
/// Primary path: scan existing numbers under today's prefix and increment
/// the maximum sequence. Fallback path: on lookup failure, derive a number
/// from the timestamp and log a warning. Generation itself never fails.
pub struct InvoiceNumberGenerator<S> {
    source: S,
}

impl<S: InvoiceNumberSource> InvoiceNumberGenerator<S> {
    /// Creates a generator over the given number source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Generates the next invoice number for `today`.
    ///
    /// `now` is only consulted on the fallback path.
    pub async fn generate(&self, today: NaiveDate, now: DateTime<Utc>) -> String {
        match self.source.numbers_with_prefix(&date_prefix(today)).await {
            Ok(existing) => next_in_sequence(today, existing.iter().map(String::as_str)),
            Err(error) => {
                warn!(%error, "invoice number lookup failed, using timestamp fallback");
                fallback_number(now)
            }
        }
    }
}
