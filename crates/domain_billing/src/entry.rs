//! Billable entries
//!
//! A billable entry is one unit of trackable work: a description, the date
//! it was worked, the hours spent, and optionally an entry-specific hourly
//! rate that overrides the customer's default. Entries are billed at most
//! once; invoicing flips `is_invoiced` and links the owning invoice.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, EntryId, InvoiceId, Money};
use domain_customer::Customer;

use crate::error::BillingError;

/// A unit of trackable, billable work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillableEntry {
    /// Unique identifier
    pub id: EntryId,
    /// Owning customer
    pub customer_id: CustomerId,
    /// Work description
    pub description: String,
    /// Optional project tag
    pub project: Option<String>,
    /// Optional category tag
    pub category: Option<String>,
    /// Date the work was performed
    pub date_worked: NaiveDate,
    /// Hours worked (positive, two-decimal precision)
    pub hours: Decimal,
    /// Entry-specific hourly rate; overrides the customer default
    pub hourly_rate: Option<Money>,
    /// Stored total amount; recomputed lazily when absent
    pub total_amount: Option<Money>,
    /// Whether this entry has been billed
    pub is_invoiced: bool,
    /// The invoice this entry was billed on, once invoiced
    pub invoice_id: Option<InvoiceId>,
    /// Source file name, when the entry came from an import
    pub import_source: Option<String>,
    /// Import timestamp
    pub imported_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl BillableEntry {
    /// Creates a new unbilled entry
    pub fn new(
        customer_id: CustomerId,
        description: impl Into<String>,
        date_worked: NaiveDate,
        hours: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntryId::new_v7(),
            customer_id,
            description: description.into(),
            project: None,
            category: None,
            date_worked,
            hours,
            hourly_rate: None,
            total_amount: None,
            is_invoiced: false,
            invoice_id: None,
            import_source: None,
            imported_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the project tag
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Sets the category tag
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets an entry-specific hourly rate
    pub fn with_hourly_rate(mut self, rate: Money) -> Self {
        self.hourly_rate = Some(rate);
        self
    }

    /// Records where this entry was imported from
    pub fn with_import_provenance(
        mut self,
        source: impl Into<String>,
        imported_at: DateTime<Utc>,
    ) -> Self {
        self.import_source = Some(source.into());
        self.imported_at = Some(imported_at);
        self
    }

    /// Checks the `hours > 0` invariant
    pub fn ensure_valid(&self) -> Result<(), BillingError> {
        if self.hours <= Decimal::ZERO {
            return Err(BillingError::InvalidHours {
                entry: self.id.to_string(),
                hours: self.hours,
            });
        }
        Ok(())
    }

    /// Resolves the effective hourly rate for this entry.
    ///
    /// Resolution order: entry rate → customer default rate → zero. A zero
    /// resolvable rate prices the entry at zero; it is not an error.
    pub fn effective_rate(&self, customer: &Customer) -> Money {
        self.hourly_rate
            .or(customer.default_hourly_rate)
            .unwrap_or_else(|| Money::zero(customer.currency))
    }

    /// Returns the billable amount for this entry.
    ///
    /// The stored amount is used when present; otherwise it is recomputed
    /// as `round(hours × effective rate)`.
    pub fn amount(&self, customer: &Customer) -> Result<Money, BillingError> {
        if let Some(stored) = self.total_amount {
            return Ok(stored);
        }
        Ok(self.effective_rate(customer).multiply_quantity(self.hours)?)
    }

    /// Recomputes and stores the total amount from the current rate sources
    pub fn update_total_amount(&mut self, customer: &Customer) -> Result<(), BillingError> {
        let amount = self.effective_rate(customer).multiply_quantity(self.hours)?;
        self.total_amount = Some(amount);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Marks this entry as billed on the given invoice.
    ///
    /// An entry can be billed at most once; a second attempt is an error.
    pub fn mark_invoiced(&mut self, invoice_id: InvoiceId) -> Result<(), BillingError> {
        if self.is_invoiced {
            return Err(BillingError::AlreadyInvoiced(self.id.to_string()));
        }
        self.is_invoiced = true;
        self.invoice_id = Some(invoice_id);
        self.updated_at = Utc::now();
        Ok(())
    }
}
