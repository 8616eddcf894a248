//! Customer Domain
//!
//! This crate manages the invoiced parties: the companies and people that
//! billable hours are tracked against. A customer carries contact details,
//! a tax identifier, and the billing defaults (hourly rate, currency) that
//! pricing falls back to when an entry has no rate of its own.
//!
//! Customers are soft-deleted through the `is_active` flag so historical
//! invoices keep their references.

pub mod customer;
pub mod error;

pub use customer::Customer;
pub use error::CustomerError;
