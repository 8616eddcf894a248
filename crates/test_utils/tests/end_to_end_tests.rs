//! End-to-end flow tests
//!
//! Drives the whole pipeline the way an external caller would: seed a
//! customer and their hours, create the invoice, render the document in
//! both locales, and record the document path.

use rust_decimal_macros::dec;

use core_kernel::Currency;
use domain_billing::BillingError;
use infra_db::{InvoiceCreationError, NewInvoiceRequest};
use render_pdf::{render_document, FontConfig, Locale, RenderContext, SellerProfile};
use test_utils::{
    assert_invoice_consistent, MoneyFixtures, StringFixtures, TaxFixtures, TemporalFixtures,
    TestCustomerBuilder, TestDatabase, TestEntryBuilder,
};

fn request(db_customer: core_kernel::CustomerId) -> NewInvoiceRequest {
    NewInvoiceRequest {
        customer_id: db_customer,
        tax_rate: TaxFixtures::polish_vat(),
        issue_date: TemporalFixtures::work_date(),
        due_date: Some(TemporalFixtures::due_date()),
        notes: Some("Thank you for your business.".to_string()),
        terms: Some("Net 14 days.".to_string()),
        invoice_number: None,
    }
}

fn seller() -> SellerProfile {
    SellerProfile {
        name: "Bright Consulting".to_string(),
        business_type: None,
        address: "ul. Obrzetska 1a/118".to_string(),
        city: "02-691 Warszawa".to_string(),
        tax_id: "7281339661".to_string(),
        regon: None,
        phone: None,
        email: None,
        bank_name: None,
        bank_account: None,
        brand: None,
    }
}

#[tokio::test]
async fn test_full_invoice_flow_generic_locale() {
    let db = TestDatabase::new().await;

    let customer = TestCustomerBuilder::new()
        .with_contact_person("Jane Doe")
        .build();
    db.seed_customer(&customer).await;
    db.seed_entries(&[
        TestEntryBuilder::for_customer(customer.id)
            .with_description(StringFixtures::hours_description())
            .with_hours(dec!(2.00))
            .build(),
        TestEntryBuilder::for_customer(customer.id)
            .with_description("Code review hours")
            .with_hours(dec!(1.50))
            .with_project("website")
            .build(),
    ])
    .await;

    let priced = db
        .invoices
        .create_from_unbilled(request(customer.id))
        .await
        .unwrap();

    assert_eq!(priced.invoice.invoice_number, StringFixtures::first_invoice_number());
    assert_eq!(priced.invoice.subtotal.minor(), 17500);
    assert_eq!(priced.invoice.total_amount.minor(), 21525);
    assert_invoice_consistent(&priced.invoice, &priced.line_items);

    let ctx = RenderContext {
        locale: Locale::Generic,
        seller: seller(),
        header_image: None,
        fonts: FontConfig::default(),
        generated_at: TemporalFixtures::generated_at(),
    };
    let bytes = render_document(&priced.invoice, &customer, &priced.line_items, &ctx).unwrap();
    assert_eq!(&bytes[..5], b"%PDF-");

    db.invoices
        .set_document_path(priced.invoice.id, "invoices/invoice_INV-20250101-001.pdf")
        .await
        .unwrap();
    let stored = db.invoices.find_by_id(priced.invoice.id).await.unwrap();
    assert!(stored.document_path.is_some());
}

#[tokio::test]
async fn test_full_invoice_flow_polish_locale() {
    let db = TestDatabase::new().await;

    let customer = TestCustomerBuilder::new()
        .with_name("Jasna Software Sp. z o.o.")
        .with_currency(Currency::PLN)
        .with_tax_id("123-456-78-90")
        .with_default_hourly_rate(MoneyFixtures::pln_rate())
        .build();
    db.seed_customer(&customer).await;
    db.seed_entries(&[TestEntryBuilder::for_customer(customer.id)
        .with_description("Przepracowane godziny konsultacji")
        .with_hours(dec!(8.00))
        .build()])
    .await;

    let priced = db
        .invoices
        .create_from_unbilled(request(customer.id))
        .await
        .unwrap();
    assert_eq!(priced.invoice.currency, Currency::PLN);
    assert_invoice_consistent(&priced.invoice, &priced.line_items);

    let ctx = RenderContext {
        locale: Locale::Polish,
        seller: seller(),
        header_image: None,
        fonts: FontConfig::default(),
        generated_at: TemporalFixtures::generated_at(),
    };
    let bytes = render_document(&priced.invoice, &customer, &priced.line_items, &ctx).unwrap();
    assert_eq!(&bytes[..5], b"%PDF-");
}

#[tokio::test]
async fn test_zero_rate_customer_flows_through_at_zero() {
    let db = TestDatabase::new().await;

    let customer = TestCustomerBuilder::new()
        .with_name("Pro Bono Client")
        .without_default_hourly_rate()
        .build();
    db.seed_customer(&customer).await;
    db.seed_entries(&[TestEntryBuilder::for_customer(customer.id)
        .with_hours(dec!(4.00))
        .build()])
    .await;

    let priced = db
        .invoices
        .create_from_unbilled(request(customer.id))
        .await
        .unwrap();
    assert!(priced.invoice.total_amount.is_zero());
    assert_invoice_consistent(&priced.invoice, &priced.line_items);
}

#[tokio::test]
async fn test_empty_customer_has_nothing_to_bill() {
    let db = TestDatabase::new().await;

    let customer = TestCustomerBuilder::new().build();
    db.seed_customer(&customer).await;

    let result = db.invoices.create_from_unbilled(request(customer.id)).await;
    assert!(matches!(
        result,
        Err(InvoiceCreationError::Billing(BillingError::NothingToBill(_)))
    ));

    // No invoice record was created
    let invoices = db.invoices.list_for_customer(customer.id).await.unwrap();
    assert!(invoices.is_empty());
}
