//! Invoice management
//!
//! This module defines the priced invoice and its line items. An invoice is
//! denominated in a single currency (snapshotted from the customer at
//! creation time) and carries integer-minor-unit totals with the tax rate in
//! basis points.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, CustomerId, InvoiceId, LineItemId, Money, TaxRate};

use crate::error::BillingError;

/// Invoice status
///
/// Initial state is `Draft`. Transitions are explicit caller actions; this
/// core defines no automatic transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Invoice has been created but not sent
    Draft,
    /// Invoice has been sent to the customer
    Sent,
    /// Invoice has been paid
    Paid,
    /// Invoice has been cancelled
    Cancelled,
}

impl InvoiceStatus {
    /// Returns the lowercase wire/storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    /// Parses the lowercase wire/storage name
    pub fn parse(s: &str) -> Option<InvoiceStatus> {
        match s {
            "draft" => Some(InvoiceStatus::Draft),
            "sent" => Some(InvoiceStatus::Sent),
            "paid" => Some(InvoiceStatus::Paid),
            "cancelled" => Some(InvoiceStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A priced, tax-computed invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Customer being billed
    pub customer_id: CustomerId,
    /// Human-readable invoice number, globally unique
    pub invoice_number: String,
    /// Issue date
    pub invoice_date: NaiveDate,
    /// Payment due date
    pub due_date: Option<NaiveDate>,
    /// Status
    pub status: InvoiceStatus,
    /// Invoice currency, snapshotted from the customer at creation
    pub currency: Currency,
    /// Sum of all line totals
    pub subtotal: Money,
    /// Tax rate in basis points
    pub tax_rate: TaxRate,
    /// Tax amount: `round(subtotal × tax_rate / 10000)`
    pub tax_amount: Money,
    /// Total: `subtotal + tax_amount`
    pub total_amount: Money,
    /// Free-text notes
    pub notes: Option<String>,
    /// Free-text payment terms
    pub terms: Option<String>,
    /// Path of the generated document, once rendered
    pub document_path: Option<String>,
    /// Payment date, set externally
    pub paid_date: Option<NaiveDate>,
    /// Payment method, set externally
    pub payment_method: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a new draft invoice with zero totals
    pub fn new(
        customer_id: CustomerId,
        invoice_number: impl Into<String>,
        invoice_date: NaiveDate,
        due_date: Option<NaiveDate>,
        currency: Currency,
        tax_rate: TaxRate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: InvoiceId::new_v7(),
            customer_id,
            invoice_number: invoice_number.into(),
            invoice_date,
            due_date,
            status: InvoiceStatus::Draft,
            currency,
            subtotal: Money::zero(currency),
            tax_rate,
            tax_amount: Money::zero(currency),
            total_amount: Money::zero(currency),
            notes: None,
            terms: None,
            document_path: None,
            paid_date: None,
            payment_method: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the free-text notes
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Sets the free-text payment terms
    pub fn with_terms(mut self, terms: Option<String>) -> Self {
        self.terms = terms;
        self
    }

    /// Computes tax and total from the given subtotal.
    ///
    /// `tax = round(subtotal × tax_rate / 10000)`, `total = subtotal + tax`.
    pub fn set_totals(&mut self, subtotal: Money) -> Result<(), BillingError> {
        let tax = self.tax_rate.apply(subtotal)?;
        self.subtotal = subtotal;
        self.tax_amount = tax;
        self.total_amount = subtotal.checked_add(&tax)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Verifies the totals invariant:
    /// `total = subtotal + tax` and `tax = round(subtotal × tax_rate / 10000)`
    pub fn verify_totals(&self) -> Result<(), BillingError> {
        let expected_tax = self.tax_rate.apply(self.subtotal)?;
        if self.tax_amount != expected_tax {
            return Err(BillingError::TotalsInvariant(format!(
                "tax {} does not match {} applied to subtotal {}",
                self.tax_amount, self.tax_rate, self.subtotal
            )));
        }
        let expected_total = self.subtotal.checked_add(&self.tax_amount)?;
        if self.total_amount != expected_total {
            return Err(BillingError::TotalsInvariant(format!(
                "total {} does not equal subtotal {} + tax {}",
                self.total_amount, self.subtotal, self.tax_amount
            )));
        }
        Ok(())
    }

    /// Marks the invoice as sent
    pub fn mark_sent(&mut self) -> Result<(), BillingError> {
        if self.status == InvoiceStatus::Cancelled {
            return Err(BillingError::InvalidTransition(
                "cannot send a cancelled invoice".to_string(),
            ));
        }
        self.status = InvoiceStatus::Sent;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Records an external payment and marks the invoice paid
    pub fn record_payment(
        &mut self,
        paid_date: NaiveDate,
        payment_method: Option<String>,
    ) -> Result<(), BillingError> {
        if self.status == InvoiceStatus::Cancelled {
            return Err(BillingError::InvalidTransition(
                "cannot pay a cancelled invoice".to_string(),
            ));
        }
        self.status = InvoiceStatus::Paid;
        self.paid_date = Some(paid_date);
        self.payment_method = payment_method;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Cancels the invoice
    pub fn cancel(&mut self) -> Result<(), BillingError> {
        if self.status == InvoiceStatus::Paid {
            return Err(BillingError::InvalidTransition(
                "cannot cancel a paid invoice".to_string(),
            ));
        }
        self.status = InvoiceStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Records the path of the rendered document
    pub fn set_document_path(&mut self, path: impl Into<String>) {
        self.document_path = Some(path.into());
        self.updated_at = Utc::now();
    }
}

/// One priced row on an invoice, derived from one billable entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    /// Unique identifier
    pub id: LineItemId,
    /// Owning invoice
    pub invoice_id: InvoiceId,
    /// Description, carried over from the billable entry
    pub description: String,
    /// Quantity in decimal hours
    pub quantity: Decimal,
    /// Unit price in minor units
    pub unit_price: Money,
    /// Line total: `round(quantity × unit_price)`
    pub total_amount: Money,
    /// Optional project tag
    pub project: Option<String>,
    /// Optional category tag
    pub category: Option<String>,
    /// Position of this line on the invoice
    pub line_order: u32,
}

impl InvoiceLineItem {
    /// Creates a line item, computing the line total from quantity and price
    pub fn new(
        invoice_id: InvoiceId,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Money,
        line_order: u32,
    ) -> Result<Self, BillingError> {
        let total_amount = unit_price.multiply_quantity(quantity)?;
        Ok(Self {
            id: LineItemId::new_v7(),
            invoice_id,
            description: description.into(),
            quantity,
            unit_price,
            total_amount,
            project: None,
            category: None,
            line_order,
        })
    }

    /// Sets the project tag
    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }

    /// Sets the category tag
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Verifies the `line_total = round(quantity × unit_price)` invariant
    pub fn verify_total(&self) -> Result<(), BillingError> {
        let expected = self.unit_price.multiply_quantity(self.quantity)?;
        if self.total_amount != expected {
            return Err(BillingError::TotalsInvariant(format!(
                "line total {} does not equal {} × {}",
                self.total_amount, self.quantity, self.unit_price
            )));
        }
        Ok(())
    }
}
