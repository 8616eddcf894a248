//! Infrastructure Database Layer
//!
//! This crate provides the database infrastructure for the invoicing core,
//! persisting customers, billable entries, and invoices in SQLite via SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern, hiding SQL and row mapping
//! from the domain layer. The one multi-statement operation - creating an
//! invoice from unbilled entries - runs inside a single transaction: the
//! invoice, its line items, and the entry flag flips all commit together
//! or not at all.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool_from_url, run_migrations, InvoiceRepository};
//!
//! let pool = create_pool_from_url("sqlite://data/invoicing.db").await?;
//! run_migrations(&pool).await?;
//! let invoices = InvoiceRepository::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::{
    CustomerRepository, EntryRepository, InvoiceCreationError, InvoiceRepository,
    NewInvoiceRequest,
};
