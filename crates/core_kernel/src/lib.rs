//! Core Kernel - Foundational types for the invoicing system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money in integer minor units with exact arithmetic
//! - Tax rates in integer basis points
//! - Strongly-typed identifiers

pub mod identifiers;
pub mod money;

pub use identifiers::{CustomerId, EntryId, InvoiceId, LineItemId};
pub use money::{round_to_minor, Currency, Money, MoneyError, TaxRate};
