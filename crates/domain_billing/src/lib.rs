//! Billing Domain - Time Tracking and Invoice Pricing
//!
//! This crate implements the billing rules of the invoicing core: billable
//! entries with effective-rate resolution, invoice pricing with exact
//! minor-unit totals, and date-scoped invoice numbering.
//!
//! # Pricing Rules
//!
//! Every invoice is priced from a set of unbilled entries:
//! - one line item per entry: `line_total = round(hours × effective_rate)`
//! - `subtotal = Σ line totals`
//! - `tax = round(subtotal × tax_rate_basis_points / 10000)`
//! - `total = subtotal + tax`
//!
//! All rounding is half-away-from-zero to the nearest minor unit.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::pricing::{price_entries, InvoiceParameters};
//!
//! let priced = price_entries(&customer, &entries, params)?;
//! repository.create(priced).await?;
//! ```

pub mod entry;
pub mod error;
pub mod invoice;
pub mod numbering;
pub mod pricing;

pub use entry::BillableEntry;
pub use error::BillingError;
pub use invoice::{Invoice, InvoiceLineItem, InvoiceStatus};
pub use numbering::{
    fallback_number, next_in_sequence, InvoiceNumberGenerator, InvoiceNumberSource, LookupError,
};
pub use pricing::{price_entries, InvoiceParameters, PricedInvoice};
