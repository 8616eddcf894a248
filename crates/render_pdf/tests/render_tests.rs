//! Rendering tests
//!
//! PDF output is binary, so these tests assert on document production (a
//! well-formed, non-trivial PDF byte stream for every layout variant)
//! rather than pixel placement.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, TaxRate};
use domain_billing::pricing::{price_entries, InvoiceParameters};
use domain_billing::{BillableEntry, Invoice, InvoiceLineItem};
use domain_customer::Customer;
use render_pdf::{
    render_document, BrandHeader, FontConfig, Locale, RenderContext, SellerProfile,
};

fn seller(with_brand: bool) -> SellerProfile {
    SellerProfile {
        name: "Bright Consulting".to_string(),
        business_type: Some("COACHING SZKOLENIA DORADZTWO HR".to_string()),
        address: "ul. Obrzetska 1a/118".to_string(),
        city: "02-691 Warszawa".to_string(),
        tax_id: "7281339661".to_string(),
        regon: None,
        phone: Some("+48 22 123 45 67".to_string()),
        email: Some("kontakt@bright.example".to_string()),
        bank_name: Some("BRE BANK SA".to_string()),
        bank_account: Some("64 1140 2004 0000 3202 3382 6537".to_string()),
        brand: with_brand.then(|| BrandHeader {
            title: "bright".to_string(),
            subtitle: "ways to grow".to_string(),
            description: "coaching, szkolenia, doradztwo HR".to_string(),
        }),
    }
}

fn context(locale: Locale, with_brand: bool) -> RenderContext {
    RenderContext {
        locale,
        seller: seller(with_brand),
        header_image: None,
        fonts: FontConfig::default(),
        generated_at: generated_at(),
    }
}

fn generated_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-08-07T14:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn work_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
}

fn priced_invoice(
    currency: Currency,
    descriptions: &[&str],
    tax_bp: i64,
) -> (Invoice, Customer, Vec<InvoiceLineItem>) {
    let customer = Customer::new("Acme Corp", currency)
        .with_email("ap@acme.example")
        .with_tax_id("123-456-78-90")
        .with_contact_person("Jane Doe")
        .with_address(
            "123 Business St",
            "Springfield",
            Some("IL".to_string()),
            Some("62704".to_string()),
            Some("USA".to_string()),
        )
        .with_default_hourly_rate(Money::from_minor(5000, currency));

    let entries: Vec<BillableEntry> = descriptions
        .iter()
        .map(|description| {
            BillableEntry::new(customer.id, *description, work_date(), dec!(2.00))
        })
        .collect();

    let priced = price_entries(
        &customer,
        &entries,
        InvoiceParameters {
            invoice_number: "INV-20260807-001".to_string(),
            issue_date: work_date(),
            due_date: work_date().checked_add_days(chrono::Days::new(14)),
            tax_rate: TaxRate::from_basis_points(tax_bp),
            notes: Some("Payment by bank transfer, please.".to_string()),
            terms: Some("Net 14 days.".to_string()),
        },
    )
    .unwrap();

    (priced.invoice, customer, priced.line_items)
}

fn assert_is_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 500, "document suspiciously small: {} bytes", bytes.len());
    assert_eq!(&bytes[..5], b"%PDF-");
}

#[test]
fn test_english_layout_produces_a_pdf() {
    let (invoice, customer, items) =
        priced_invoice(Currency::USD, &["Development hours", "Code review"], 825);
    let bytes =
        render_document(&invoice, &customer, &items, &context(Locale::Generic, false)).unwrap();
    assert_is_pdf(&bytes);
}

#[test]
fn test_english_layout_with_zero_tax() {
    let (invoice, customer, items) = priced_invoice(Currency::USD, &["Development hours"], 0);
    assert!(invoice.tax_amount.is_zero());
    let bytes =
        render_document(&invoice, &customer, &items, &context(Locale::Generic, false)).unwrap();
    assert_is_pdf(&bytes);
}

#[test]
fn test_polish_layout_produces_a_pdf() {
    let (invoice, customer, items) =
        priced_invoice(Currency::PLN, &["Przepracowane godziny", "Konsultacje"], 2300);
    let bytes =
        render_document(&invoice, &customer, &items, &context(Locale::Polish, false)).unwrap();
    assert_is_pdf(&bytes);
}

#[test]
fn test_polish_layout_with_text_banner() {
    let (invoice, customer, items) =
        priced_invoice(Currency::PLN, &["Przepracowane godziny"], 2300);
    let bytes =
        render_document(&invoice, &customer, &items, &context(Locale::Polish, true)).unwrap();
    assert_is_pdf(&bytes);
}

#[test]
fn test_missing_header_image_degrades_not_fails() {
    let (invoice, customer, items) =
        priced_invoice(Currency::PLN, &["Przepracowane godziny"], 2300);
    let mut ctx = context(Locale::Polish, true);
    ctx.header_image = Some("does/not/exist.png".into());

    let bytes = render_document(&invoice, &customer, &items, &ctx).unwrap();
    assert_is_pdf(&bytes);
}

#[test]
fn test_missing_fonts_degrade_not_fail() {
    let (invoice, customer, items) = priced_invoice(Currency::USD, &["Development hours"], 825);
    let mut ctx = context(Locale::Generic, false);
    ctx.fonts = FontConfig {
        regular: Some("no/such/font.ttf".into()),
        bold: Some("no/such/font-bold.ttf".into()),
    };

    let bytes = render_document(&invoice, &customer, &items, &ctx).unwrap();
    assert_is_pdf(&bytes);
}

#[test]
fn test_many_line_items_paginate() {
    let descriptions: Vec<String> = (1..=60)
        .map(|i| format!("Consulting block {i} with a fairly long description that wraps"))
        .collect();
    let refs: Vec<&str> = descriptions.iter().map(String::as_str).collect();

    let (invoice, customer, items) = priced_invoice(Currency::USD, &refs, 2300);
    let bytes =
        render_document(&invoice, &customer, &items, &context(Locale::Generic, false)).unwrap();
    assert_is_pdf(&bytes);

    let (invoice, customer, items) = priced_invoice(Currency::PLN, &refs, 2300);
    let bytes =
        render_document(&invoice, &customer, &items, &context(Locale::Polish, false)).unwrap();
    assert_is_pdf(&bytes);
}

#[test]
fn test_render_to_file_writes_document() {
    let dir = std::env::temp_dir().join("render_pdf_tests");
    let path = dir.join("invoice_INV-20260807-001.pdf");
    let _ = std::fs::remove_file(&path);

    let (invoice, customer, items) = priced_invoice(Currency::USD, &["Development hours"], 825);
    render_pdf::render_to_file(
        &path,
        &invoice,
        &customer,
        &items,
        &context(Locale::Generic, false),
    )
    .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_is_pdf(&bytes);
}
