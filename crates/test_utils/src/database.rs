//! Database Test Utilities
//!
//! Provides an in-memory SQLite database with the schema applied, plus
//! seeding helpers for integration tests. The pool is capped at a single
//! connection because every `sqlite::memory:` connection gets its own
//! private database.

use core_kernel::CustomerId;
use domain_billing::BillableEntry;
use domain_customer::Customer;
use infra_db::{
    create_pool, run_migrations, CustomerRepository, DatabaseConfig, DatabasePool,
    EntryRepository, InvoiceRepository,
};

/// An in-memory test database with repositories attached
pub struct TestDatabase {
    pub pool: DatabasePool,
    pub customers: CustomerRepository,
    pub entries: EntryRepository,
    pub invoices: InvoiceRepository,
}

impl TestDatabase {
    /// Creates a fresh in-memory database with migrations applied
    pub async fn new() -> Self {
        let pool = create_pool(DatabaseConfig::new("sqlite::memory:").max_connections(1))
            .await
            .expect("in-memory pool");
        run_migrations(&pool).await.expect("migrations");

        Self {
            customers: CustomerRepository::new(pool.clone()),
            entries: EntryRepository::new(pool.clone()),
            invoices: InvoiceRepository::new(pool.clone()),
            pool,
        }
    }

    /// Persists a customer and returns its id
    pub async fn seed_customer(&self, customer: &Customer) -> CustomerId {
        self.customers.create(customer).await.expect("seed customer");
        customer.id
    }

    /// Persists a batch of billable entries
    pub async fn seed_entries(&self, entries: &[BillableEntry]) {
        for entry in entries {
            self.entries.create(entry).await.expect("seed entry");
        }
    }
}
