//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_billing::{Invoice, InvoiceLineItem};

/// Asserts that two Money values are equal within a minor-unit tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more
/// than `tolerance_minor`
pub fn assert_money_approx_eq(actual: Money, expected: Money, tolerance_minor: i64) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.minor() - expected.minor()).abs();
    assert!(
        diff <= tolerance_minor,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={} minor units",
        actual,
        expected,
        diff
    );
}

/// Asserts the full totals invariant of an invoice and its line items:
/// line totals follow the rounding rule, the subtotal is their sum, and
/// tax/total match the invoice's rate.
///
/// # Panics
///
/// Panics with a descriptive message on any violated invariant
pub fn assert_invoice_consistent(invoice: &Invoice, line_items: &[InvoiceLineItem]) {
    for item in line_items {
        item.verify_total()
            .unwrap_or_else(|e| panic!("line {} inconsistent: {}", item.line_order, e));
        assert_eq!(
            item.invoice_id, invoice.id,
            "line {} belongs to a different invoice",
            item.line_order
        );
    }

    let line_sum: i64 = line_items.iter().map(|i| i.total_amount.minor()).sum();
    assert_eq!(
        line_sum,
        invoice.subtotal.minor(),
        "subtotal {} does not equal sum of line totals {}",
        invoice.subtotal,
        line_sum
    );

    invoice
        .verify_totals()
        .unwrap_or_else(|e| panic!("invoice totals inconsistent: {}", e));
}
