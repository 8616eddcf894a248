//! Invoice pricing
//!
//! The pure half of the invoice aggregator: given a customer and their
//! unbilled entries, produce a fully priced invoice with one line item per
//! entry. Persistence (and the atomicity guarantee around flagging entries)
//! lives in the repository layer; everything here is deterministic and
//! side-effect free.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{EntryId, Money, TaxRate};
use domain_customer::Customer;

use crate::entry::BillableEntry;
use crate::error::BillingError;
use crate::invoice::{Invoice, InvoiceLineItem};

/// Caller-supplied parameters for a new invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceParameters {
    /// The invoice number to assign (generated or caller override)
    pub invoice_number: String,
    /// Issue date
    pub issue_date: NaiveDate,
    /// Payment due date
    pub due_date: Option<NaiveDate>,
    /// Tax rate in basis points
    pub tax_rate: TaxRate,
    /// Free-text notes
    pub notes: Option<String>,
    /// Free-text payment terms
    pub terms: Option<String>,
}

/// A fully priced invoice ready for persistence
///
/// `entry_ids` lists the billable entries consumed by this invoice, in line
/// order; the persistence layer flips their invoiced flags in the same
/// transaction that stores the invoice.
#[derive(Debug, Clone)]
pub struct PricedInvoice {
    pub invoice: Invoice,
    pub line_items: Vec<InvoiceLineItem>,
    pub entry_ids: Vec<EntryId>,
}

/// Prices a set of unbilled entries into an invoice.
///
/// Validation happens before any pricing: the entry set must be non-empty,
/// every entry must belong to `customer`, must not be invoiced yet, and must
/// have positive hours. Entries whose resolvable rate is zero price at zero;
/// that is not an error.
///
/// Pricing rules:
/// 1. One line item per entry, in input order: quantity = hours, unit price
///    = effective rate (entry rate → customer default → 0), line total =
///    `round(quantity × unit_price)`.
/// 2. `subtotal = Σ line totals`
/// 3. `tax = round(subtotal × tax_rate / 10000)`
/// 4. `total = subtotal + tax`
pub fn price_entries(
    customer: &Customer,
    entries: &[BillableEntry],
    params: InvoiceParameters,
) -> Result<PricedInvoice, BillingError> {
    if entries.is_empty() {
        return Err(BillingError::NothingToBill(customer.id.to_string()));
    }

    for entry in entries {
        if entry.customer_id != customer.id {
            return Err(BillingError::CustomerMismatch {
                entry: entry.id.to_string(),
                customer: customer.id.to_string(),
            });
        }
        if entry.is_invoiced {
            return Err(BillingError::AlreadyInvoiced(entry.id.to_string()));
        }
        entry.ensure_valid()?;
    }

    let invoice = Invoice::new(
        customer.id,
        params.invoice_number,
        params.issue_date,
        params.due_date,
        customer.currency,
        params.tax_rate,
    )
    .with_notes(params.notes)
    .with_terms(params.terms);

    let mut line_items = Vec::with_capacity(entries.len());
    let mut subtotal = Money::zero(customer.currency);

    for (index, entry) in entries.iter().enumerate() {
        let unit_price = entry.effective_rate(customer);
        let item = InvoiceLineItem::new(
            invoice.id,
            entry.description.clone(),
            entry.hours,
            unit_price,
            index as u32,
        )?
        .with_project(entry.project.clone())
        .with_category(entry.category.clone());

        subtotal = subtotal.checked_add(&item.total_amount)?;
        line_items.push(item);
    }

    let mut invoice = invoice;
    invoice.set_totals(subtotal)?;

    Ok(PricedInvoice {
        invoice,
        line_items,
        entry_ids: entries.iter().map(|e| e.id).collect(),
    })
}
