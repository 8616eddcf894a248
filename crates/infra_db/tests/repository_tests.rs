//! Repository integration tests on in-memory SQLite
//!
//! The pool is capped at one connection: every `sqlite::memory:` connection
//! would otherwise get its own private database.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, TaxRate};
use domain_billing::numbering::{InvoiceNumberGenerator, InvoiceNumberSource};
use domain_billing::{BillableEntry, BillingError, InvoiceStatus};
use domain_customer::Customer;
use infra_db::{
    create_pool, run_migrations, CustomerRepository, DatabaseConfig, DatabaseError, DatabasePool,
    EntryRepository, InvoiceCreationError, InvoiceRepository, NewInvoiceRequest,
};

async fn test_pool() -> DatabasePool {
    let pool = create_pool(DatabaseConfig::new("sqlite::memory:").max_connections(1))
        .await
        .expect("in-memory pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}

fn acme() -> Customer {
    Customer::new("Acme Corp", Currency::USD)
        .with_email("ap@acme.example")
        .with_tax_id("12-3456789")
        .with_default_hourly_rate(Money::from_minor(5000, Currency::USD))
}

fn work_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn request(customer: &Customer, number: Option<&str>) -> NewInvoiceRequest {
    NewInvoiceRequest {
        customer_id: customer.id,
        tax_rate: TaxRate::from_basis_points(2300),
        issue_date: work_date(),
        due_date: work_date().checked_add_days(chrono::Days::new(14)),
        notes: None,
        terms: None,
        invoice_number: number.map(str::to_string),
    }
}

async fn seed_entries(pool: &DatabasePool, customer: &Customer, hours: &[&str]) {
    let entries = EntryRepository::new(pool.clone());
    for (i, h) in hours.iter().enumerate() {
        let entry = BillableEntry::new(
            customer.id,
            format!("Consulting hours block {}", i + 1),
            work_date(),
            h.parse().unwrap(),
        );
        entries.create(&entry).await.unwrap();
    }
}

#[tokio::test]
async fn test_customer_round_trip() {
    let pool = test_pool().await;
    let customers = CustomerRepository::new(pool.clone());

    let customer = acme().with_address(
        "123 Business St",
        "Springfield",
        Some("IL".to_string()),
        Some("62704".to_string()),
        Some("USA".to_string()),
    );
    customers.create(&customer).await.unwrap();

    let loaded = customers.find_by_id(customer.id).await.unwrap();
    assert_eq!(loaded.name, "Acme Corp");
    assert_eq!(loaded.currency, Currency::USD);
    assert_eq!(
        loaded.default_hourly_rate,
        Some(Money::from_minor(5000, Currency::USD))
    );
    assert_eq!(loaded.formatted_address(), customer.formatted_address());
    assert!(loaded.is_active);
}

#[tokio::test]
async fn test_deactivated_customer_leaves_active_list() {
    let pool = test_pool().await;
    let customers = CustomerRepository::new(pool.clone());

    let customer = acme();
    customers.create(&customer).await.unwrap();
    assert_eq!(customers.list_active().await.unwrap().len(), 1);

    customers.deactivate(customer.id).await.unwrap();
    assert!(customers.list_active().await.unwrap().is_empty());

    // Soft delete: the record itself is still there
    let loaded = customers.find_by_id(customer.id).await.unwrap();
    assert!(!loaded.is_active);
}

#[tokio::test]
async fn test_entry_round_trip_preserves_decimal_hours() {
    let pool = test_pool().await;
    let customers = CustomerRepository::new(pool.clone());
    let entries = EntryRepository::new(pool.clone());

    let customer = acme();
    customers.create(&customer).await.unwrap();

    let entry = BillableEntry::new(customer.id, "Imported work", work_date(), dec!(1.25))
        .with_project("website")
        .with_hourly_rate(Money::from_minor(7500, Currency::USD))
        .with_import_provenance("hours.csv", chrono::Utc::now());
    entries.create(&entry).await.unwrap();

    let loaded = entries.find_by_id(entry.id).await.unwrap();
    assert_eq!(loaded.hours, dec!(1.25));
    assert_eq!(loaded.hourly_rate, Some(Money::from_minor(7500, Currency::USD)));
    assert_eq!(loaded.project.as_deref(), Some("website"));
    assert_eq!(loaded.import_source.as_deref(), Some("hours.csv"));
    assert!(!loaded.is_invoiced);
}

#[tokio::test]
async fn test_invoice_creation_prices_flags_and_links() {
    let pool = test_pool().await;
    let customers = CustomerRepository::new(pool.clone());
    let invoices = InvoiceRepository::new(pool.clone());
    let entries = EntryRepository::new(pool.clone());

    let customer = acme();
    customers.create(&customer).await.unwrap();
    seed_entries(&pool, &customer, &["2.00", "1.50"]).await;

    let priced = invoices
        .create_from_unbilled(request(&customer, None))
        .await
        .unwrap();

    // The canonical scenario: 2.00h and 1.50h at $50.00, 23.00% tax
    assert_eq!(priced.invoice.subtotal.minor(), 17500);
    assert_eq!(priced.invoice.tax_amount.minor(), 4025);
    assert_eq!(priced.invoice.total_amount.minor(), 21525);
    assert_eq!(priced.invoice.invoice_number, "INV-20250101-001");
    assert_eq!(priced.invoice.status, InvoiceStatus::Draft);

    // Persisted state matches what was returned
    let loaded = invoices.find_by_number("INV-20250101-001").await.unwrap();
    assert_eq!(loaded.total_amount.minor(), 21525);
    let items = invoices.line_items(loaded.id).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].quantity, dec!(2.00));
    assert_eq!(items[0].total_amount.minor(), 10000);

    // Entries are flagged and linked, and leave the unbilled query
    for entry in entries.list_for_customer(customer.id).await.unwrap() {
        assert!(entry.is_invoiced);
        assert_eq!(entry.invoice_id, Some(loaded.id));
    }
    assert!(entries
        .find_unbilled_for_customer(customer.id)
        .await
        .unwrap()
        .is_empty());

    // A second run over the same customer has nothing to bill
    let again = invoices.create_from_unbilled(request(&customer, None)).await;
    assert!(matches!(
        again,
        Err(InvoiceCreationError::Billing(BillingError::NothingToBill(_)))
    ));
}

#[tokio::test]
async fn test_generated_numbers_increment_per_day() {
    let pool = test_pool().await;
    let customers = CustomerRepository::new(pool.clone());
    let invoices = InvoiceRepository::new(pool.clone());

    let customer = acme();
    customers.create(&customer).await.unwrap();

    seed_entries(&pool, &customer, &["1.00"]).await;
    let first = invoices
        .create_from_unbilled(request(&customer, None))
        .await
        .unwrap();
    assert_eq!(first.invoice.invoice_number, "INV-20250101-001");

    seed_entries(&pool, &customer, &["2.00"]).await;
    let second = invoices
        .create_from_unbilled(request(&customer, None))
        .await
        .unwrap();
    assert_eq!(second.invoice.invoice_number, "INV-20250101-002");
}

#[tokio::test]
async fn test_repository_is_a_number_source() {
    let pool = test_pool().await;
    let customers = CustomerRepository::new(pool.clone());
    let invoices = InvoiceRepository::new(pool.clone());

    let customer = acme();
    customers.create(&customer).await.unwrap();
    seed_entries(&pool, &customer, &["1.00"]).await;
    invoices
        .create_from_unbilled(request(&customer, Some("INV-20250101-007")))
        .await
        .unwrap();

    let numbers = invoices.numbers_with_prefix("INV-20250101").await.unwrap();
    assert_eq!(numbers, vec!["INV-20250101-007".to_string()]);

    let generator = InvoiceNumberGenerator::new(&invoices);
    let next = generator.generate(work_date(), chrono::Utc::now()).await;
    assert_eq!(next, "INV-20250101-008");
}

#[tokio::test]
async fn test_duplicate_number_rolls_back_everything() {
    let pool = test_pool().await;
    let customers = CustomerRepository::new(pool.clone());
    let invoices = InvoiceRepository::new(pool.clone());
    let entries = EntryRepository::new(pool.clone());

    let customer = acme();
    customers.create(&customer).await.unwrap();

    seed_entries(&pool, &customer, &["1.00"]).await;
    invoices
        .create_from_unbilled(request(&customer, Some("INV-FIXED")))
        .await
        .unwrap();

    seed_entries(&pool, &customer, &["3.00"]).await;
    let result = invoices
        .create_from_unbilled(request(&customer, Some("INV-FIXED")))
        .await;
    assert!(matches!(
        result,
        Err(InvoiceCreationError::DuplicateNumber(ref n)) if n == "INV-FIXED"
    ));

    // Rolled back: the second batch of entries is still unbilled
    let unbilled = entries.find_unbilled_for_customer(customer.id).await.unwrap();
    assert_eq!(unbilled.len(), 1);
    assert_eq!(unbilled[0].hours, dec!(3.00));
}

#[tokio::test]
async fn test_unknown_customer_is_reported_distinctly() {
    let pool = test_pool().await;
    let invoices = InvoiceRepository::new(pool.clone());

    let ghost = acme();
    let result = invoices.create_from_unbilled(request(&ghost, None)).await;
    assert!(matches!(result, Err(InvoiceCreationError::CustomerNotFound(_))));
}

#[tokio::test]
async fn test_payment_and_cancel_transitions() {
    let pool = test_pool().await;
    let customers = CustomerRepository::new(pool.clone());
    let invoices = InvoiceRepository::new(pool.clone());

    let customer = acme();
    customers.create(&customer).await.unwrap();
    seed_entries(&pool, &customer, &["1.00"]).await;
    let priced = invoices
        .create_from_unbilled(request(&customer, None))
        .await
        .unwrap();

    let sent = invoices.mark_sent(priced.invoice.id).await.unwrap();
    assert_eq!(sent.status, InvoiceStatus::Sent);

    let paid = invoices
        .record_payment(priced.invoice.id, work_date(), Some("wire".to_string()))
        .await
        .unwrap();
    assert_eq!(paid.status, InvoiceStatus::Paid);
    assert_eq!(paid.payment_method.as_deref(), Some("wire"));

    // Persisted, not just returned
    let loaded = invoices.find_by_id(priced.invoice.id).await.unwrap();
    assert_eq!(loaded.status, InvoiceStatus::Paid);

    // Domain guard: paid invoices cannot be cancelled
    let result = invoices.cancel(priced.invoice.id).await;
    assert!(matches!(result, Err(DatabaseError::ConstraintViolation(_))));
}

#[tokio::test]
async fn test_document_path_is_recorded() {
    let pool = test_pool().await;
    let customers = CustomerRepository::new(pool.clone());
    let invoices = InvoiceRepository::new(pool.clone());

    let customer = acme();
    customers.create(&customer).await.unwrap();
    seed_entries(&pool, &customer, &["1.00"]).await;
    let priced = invoices
        .create_from_unbilled(request(&customer, None))
        .await
        .unwrap();

    invoices
        .set_document_path(priced.invoice.id, "invoices/invoice_INV-20250101-001.pdf")
        .await
        .unwrap();

    let loaded = invoices.find_by_id(priced.invoice.id).await.unwrap();
    assert_eq!(
        loaded.document_path.as_deref(),
        Some("invoices/invoice_INV-20250101-001.pdf")
    );
}

#[tokio::test]
async fn test_delete_cascades_items_and_frees_entries() {
    let pool = test_pool().await;
    let customers = CustomerRepository::new(pool.clone());
    let invoices = InvoiceRepository::new(pool.clone());
    let entries = EntryRepository::new(pool.clone());

    let customer = acme();
    customers.create(&customer).await.unwrap();
    seed_entries(&pool, &customer, &["1.00", "2.00"]).await;
    let priced = invoices
        .create_from_unbilled(request(&customer, None))
        .await
        .unwrap();
    let invoice_id = priced.invoice.id;

    invoices.delete(invoice_id).await.unwrap();

    assert!(invoices.find_by_id(invoice_id).await.unwrap_err().is_not_found());
    assert!(invoices.line_items(invoice_id).await.unwrap().is_empty());

    // Entries revert to unbilled and can be invoiced again
    let unbilled = entries.find_unbilled_for_customer(customer.id).await.unwrap();
    assert_eq!(unbilled.len(), 2);
    for entry in unbilled {
        assert!(entry.invoice_id.is_none());
    }
}
