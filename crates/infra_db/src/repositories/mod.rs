//! Repository implementations for domain entities
//!
//! This module provides concrete repository implementations that handle
//! database access for each domain aggregate. Repositories encapsulate
//! SQL queries and map between database rows and domain types.
//!
//! # Architecture
//!
//! Each repository follows these principles:
//! - Runtime-bound queries mapped through typed row structs
//! - Transaction support for the invoice-creation sequence
//! - Decode failures surfaced as serialization errors, never panics

pub mod customer;
pub mod entry;
pub mod invoice;

mod convert;

pub use customer::CustomerRepository;
pub use entry::EntryRepository;
pub use invoice::{InvoiceCreationError, InvoiceRepository, NewInvoiceRequest};
