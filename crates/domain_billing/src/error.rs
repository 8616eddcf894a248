//! Billing domain errors

use core_kernel::MoneyError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// No unbilled entries were supplied for invoicing
    #[error("Nothing to bill: no unbilled entries for customer {0}")]
    NothingToBill(String),

    /// An entry belongs to a different customer than the invoice
    #[error("Entry {entry} does not belong to customer {customer}")]
    CustomerMismatch { entry: String, customer: String },

    /// An entry has already been billed on another invoice
    #[error("Entry {0} is already invoiced")]
    AlreadyInvoiced(String),

    /// Entry hours must be strictly positive
    #[error("Invalid hours for entry {entry}: {hours}")]
    InvalidHours { entry: String, hours: Decimal },

    /// The subtotal/tax/total invariant does not hold
    #[error("Invoice totals invariant violated: {0}")]
    TotalsInvariant(String),

    /// Disallowed status transition
    #[error("Invalid invoice state transition: {0}")]
    InvalidTransition(String),

    /// Arithmetic error while pricing
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
