//! Invoice repository
//!
//! Owns the transactional invoice-creation sequence: price the customer's
//! unbilled entries, insert the invoice and its line items, and flip every
//! consumed entry to invoiced - all in one transaction. Any failure along
//! the way rolls the whole sequence back, so entries are never left
//! partially flagged and invoices never exist without their line items.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use thiserror::Error;
use tracing::info;

use core_kernel::{CustomerId, InvoiceId, LineItemId, Money, TaxRate};
use domain_billing::numbering::{InvoiceNumberGenerator, InvoiceNumberSource, LookupError};
use domain_billing::pricing::{price_entries, InvoiceParameters, PricedInvoice};
use domain_billing::{BillingError, Invoice, InvoiceLineItem, InvoiceStatus};

use crate::error::DatabaseError;
use crate::pool::DatabasePool;
use crate::repositories::convert::{parse_currency, parse_decimal, parse_status, parse_uuid};
use crate::repositories::customer::CustomerRepository;
use crate::repositories::entry::EntryRepository;

const SELECT_COLUMNS: &str = "SELECT id, customer_id, invoice_number, invoice_date, due_date, \
     status, currency, subtotal, tax_rate, tax_amount, total_amount, notes, terms, \
     document_path, paid_date, payment_method, created_at, updated_at FROM invoices";

/// Errors surfaced by the invoice-creation sequence
///
/// `DuplicateNumber` is distinct from generic persistence failures so the
/// caller can regenerate a number and retry; everything it had done is
/// already rolled back.
#[derive(Debug, Error)]
pub enum InvoiceCreationError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Duplicate invoice number: {0}")]
    DuplicateNumber(String),

    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Caller input for creating an invoice from a customer's unbilled entries
#[derive(Debug, Clone)]
pub struct NewInvoiceRequest {
    /// The customer to bill
    pub customer_id: CustomerId,
    /// Tax rate in basis points
    pub tax_rate: TaxRate,
    /// Issue date
    pub issue_date: NaiveDate,
    /// Payment due date
    pub due_date: Option<NaiveDate>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Free-text payment terms
    pub terms: Option<String>,
    /// Caller override for the invoice number; generated when absent
    pub invoice_number: Option<String>,
}

/// Repository for invoices and their line items
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: DatabasePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository with the given connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Creates an invoice from the customer's unbilled entries.
    ///
    /// Loads the customer and their unbilled entries, prices them, resolves
    /// the invoice number (caller override or generated), then atomically:
    /// 1. inserts the invoice,
    /// 2. inserts one line item per entry,
    /// 3. flips every consumed entry to invoiced with the invoice link.
    ///
    /// The entry updates are guarded with `AND is_invoiced = 0`; a row that
    /// was billed concurrently fails the guard and the whole transaction
    /// rolls back. A uniqueness violation on the invoice number maps to
    /// [`InvoiceCreationError::DuplicateNumber`].
    pub async fn create_from_unbilled(
        &self,
        request: NewInvoiceRequest,
    ) -> Result<PricedInvoice, InvoiceCreationError> {
        let customers = CustomerRepository::new(self.pool.clone());
        let entries_repo = EntryRepository::new(self.pool.clone());

        let customer = customers.find_by_id(request.customer_id).await.map_err(|e| {
            if e.is_not_found() {
                InvoiceCreationError::CustomerNotFound(request.customer_id.to_string())
            } else {
                InvoiceCreationError::Database(e)
            }
        })?;

        let entries = entries_repo
            .find_unbilled_for_customer(request.customer_id)
            .await?;

        let invoice_number = match request.invoice_number {
            Some(number) => number,
            None => {
                InvoiceNumberGenerator::new(self)
                    .generate(request.issue_date, Utc::now())
                    .await
            }
        };

        let priced = price_entries(
            &customer,
            &entries,
            InvoiceParameters {
                invoice_number,
                issue_date: request.issue_date,
                due_date: request.due_date,
                tax_rate: request.tax_rate,
                notes: request.notes,
                terms: request.terms,
            },
        )?;

        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;
        let invoice = &priced.invoice;

        let insert_result = sqlx::query(
            "INSERT INTO invoices (
                id, customer_id, invoice_number, invoice_date, due_date, status, currency,
                subtotal, tax_rate, tax_amount, total_amount, notes, terms, document_path,
                paid_date, payment_method, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(invoice.id.as_uuid().to_string())
        .bind(invoice.customer_id.as_uuid().to_string())
        .bind(&invoice.invoice_number)
        .bind(invoice.invoice_date)
        .bind(invoice.due_date)
        .bind(invoice.status.as_str())
        .bind(invoice.currency.code())
        .bind(invoice.subtotal.minor())
        .bind(invoice.tax_rate.basis_points())
        .bind(invoice.tax_amount.minor())
        .bind(invoice.total_amount.minor())
        .bind(&invoice.notes)
        .bind(&invoice.terms)
        .bind(&invoice.document_path)
        .bind(invoice.paid_date)
        .bind(&invoice.payment_method)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&mut *tx)
        .await;

        if let Err(error) = insert_result {
            return Err(match DatabaseError::from(error) {
                DatabaseError::DuplicateEntry(_) => {
                    InvoiceCreationError::DuplicateNumber(invoice.invoice_number.clone())
                }
                other => InvoiceCreationError::Database(other),
            });
        }

        for item in &priced.line_items {
            sqlx::query(
                "INSERT INTO invoice_line_items (
                    id, invoice_id, description, quantity, unit_price, total_amount,
                    project, category, line_order
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(item.id.as_uuid().to_string())
            .bind(item.invoice_id.as_uuid().to_string())
            .bind(&item.description)
            .bind(item.quantity.to_string())
            .bind(item.unit_price.minor())
            .bind(item.total_amount.minor())
            .bind(&item.project)
            .bind(&item.category)
            .bind(item.line_order)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;
        }

        let now = Utc::now();
        for entry_id in &priced.entry_ids {
            let result = sqlx::query(
                "UPDATE billable_entries SET is_invoiced = 1, invoice_id = ?, updated_at = ? \
                 WHERE id = ? AND is_invoiced = 0",
            )
            .bind(invoice.id.as_uuid().to_string())
            .bind(now)
            .bind(entry_id.as_uuid().to_string())
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

            if result.rows_affected() != 1 {
                // Raced by a concurrent invoicing run; dropping tx rolls back.
                return Err(InvoiceCreationError::Billing(BillingError::AlreadyInvoiced(
                    entry_id.to_string(),
                )));
            }
        }

        tx.commit().await.map_err(DatabaseError::from)?;

        info!(
            invoice_number = %invoice.invoice_number,
            customer = %invoice.customer_id,
            entries = priced.entry_ids.len(),
            total_minor = invoice.total_amount.minor(),
            "invoice created"
        );

        Ok(priced)
    }

    /// Retrieves an invoice by ID
    pub async fn find_by_id(&self, id: InvoiceId) -> Result<Invoice, DatabaseError> {
        let row: Option<InvoiceRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| DatabaseError::not_found("Invoice", id))?
            .into_domain()
    }

    /// Retrieves an invoice by its human-readable number
    pub async fn find_by_number(&self, number: &str) -> Result<Invoice, DatabaseError> {
        let row: Option<InvoiceRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE invoice_number = ?"))
                .bind(number)
                .fetch_optional(&self.pool)
                .await?;

        row.ok_or_else(|| DatabaseError::not_found("Invoice", number))?
            .into_domain()
    }

    /// Lists all invoices for a customer, newest first
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Invoice>, DatabaseError> {
        let rows: Vec<InvoiceRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE customer_id = ? ORDER BY invoice_date DESC, created_at DESC"
        ))
        .bind(customer_id.as_uuid().to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(InvoiceRow::into_domain).collect()
    }

    /// Retrieves the line items of an invoice, in line order
    pub async fn line_items(&self, invoice_id: InvoiceId) -> Result<Vec<InvoiceLineItem>, DatabaseError> {
        let rows: Vec<LineItemRow> = sqlx::query_as(
            "SELECT li.id, li.invoice_id, li.description, li.quantity, li.unit_price, \
             li.total_amount, li.project, li.category, li.line_order, i.currency \
             FROM invoice_line_items li JOIN invoices i ON i.id = li.invoice_id \
             WHERE li.invoice_id = ? ORDER BY li.line_order",
        )
        .bind(invoice_id.as_uuid().to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(LineItemRow::into_domain).collect()
    }

    /// Records the path of the rendered document
    pub async fn set_document_path(
        &self,
        id: InvoiceId,
        path: &str,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE invoices SET document_path = ?, updated_at = ? WHERE id = ?")
            .bind(path)
            .bind(Utc::now())
            .bind(id.as_uuid().to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Invoice", id));
        }
        Ok(())
    }

    /// Marks an invoice as sent
    pub async fn mark_sent(&self, id: InvoiceId) -> Result<Invoice, DatabaseError> {
        let mut invoice = self.find_by_id(id).await?;
        invoice
            .mark_sent()
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
        self.persist_status(&invoice).await?;
        Ok(invoice)
    }

    /// Records an externally-made payment against an invoice
    pub async fn record_payment(
        &self,
        id: InvoiceId,
        paid_date: NaiveDate,
        payment_method: Option<String>,
    ) -> Result<Invoice, DatabaseError> {
        let mut invoice = self.find_by_id(id).await?;
        invoice
            .record_payment(paid_date, payment_method)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
        self.persist_status(&invoice).await?;
        Ok(invoice)
    }

    /// Cancels an invoice
    pub async fn cancel(&self, id: InvoiceId) -> Result<Invoice, DatabaseError> {
        let mut invoice = self.find_by_id(id).await?;
        invoice
            .cancel()
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
        self.persist_status(&invoice).await?;
        Ok(invoice)
    }

    /// Deletes an invoice.
    ///
    /// Line items are removed by the cascade; consumed entries revert to
    /// unbilled in the same transaction.
    pub async fn delete(&self, id: InvoiceId) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE billable_entries SET is_invoiced = 0, invoice_id = NULL, updated_at = ? \
             WHERE invoice_id = ?",
        )
        .bind(Utc::now())
        .bind(id.as_uuid().to_string())
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id.as_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Invoice", id));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn persist_status(&self, invoice: &Invoice) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE invoices SET status = ?, paid_date = ?, payment_method = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(invoice.status.as_str())
        .bind(invoice.paid_date)
        .bind(&invoice.payment_method)
        .bind(invoice.updated_at)
        .bind(invoice.id.as_uuid().to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// The repository doubles as the number source for the scan-based
/// generation path.
#[async_trait]
impl InvoiceNumberSource for InvoiceRepository {
    async fn numbers_with_prefix(&self, prefix: &str) -> Result<Vec<String>, LookupError> {
        sqlx::query_scalar::<_, String>(
            "SELECT invoice_number FROM invoices WHERE invoice_number LIKE ?",
        )
        .bind(format!("{prefix}%"))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LookupError(e.to_string()))
    }
}

/// Database row for an invoice
#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: String,
    customer_id: String,
    invoice_number: String,
    invoice_date: NaiveDate,
    due_date: Option<NaiveDate>,
    status: String,
    currency: String,
    subtotal: i64,
    tax_rate: i64,
    tax_amount: i64,
    total_amount: i64,
    notes: Option<String>,
    terms: Option<String>,
    document_path: Option<String>,
    paid_date: Option<NaiveDate>,
    payment_method: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InvoiceRow {
    fn into_domain(self) -> Result<Invoice, DatabaseError> {
        let currency = parse_currency(&self.currency)?;
        let status: InvoiceStatus = parse_status(&self.status)?;

        Ok(Invoice {
            id: InvoiceId::from_uuid(parse_uuid(&self.id)?),
            customer_id: CustomerId::from_uuid(parse_uuid(&self.customer_id)?),
            invoice_number: self.invoice_number,
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            status,
            currency,
            subtotal: Money::from_minor(self.subtotal, currency),
            tax_rate: TaxRate::from_basis_points(self.tax_rate),
            tax_amount: Money::from_minor(self.tax_amount, currency),
            total_amount: Money::from_minor(self.total_amount, currency),
            notes: self.notes,
            terms: self.terms,
            document_path: self.document_path,
            paid_date: self.paid_date,
            payment_method: self.payment_method,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database row for an invoice line item, with the invoice currency joined in
#[derive(Debug, FromRow)]
struct LineItemRow {
    id: String,
    invoice_id: String,
    description: String,
    quantity: String,
    unit_price: i64,
    total_amount: i64,
    project: Option<String>,
    category: Option<String>,
    line_order: i64,
    currency: String,
}

impl LineItemRow {
    fn into_domain(self) -> Result<InvoiceLineItem, DatabaseError> {
        let currency = parse_currency(&self.currency)?;
        Ok(InvoiceLineItem {
            id: LineItemId::from_uuid(parse_uuid(&self.id)?),
            invoice_id: InvoiceId::from_uuid(parse_uuid(&self.invoice_id)?),
            description: self.description,
            quantity: parse_decimal(&self.quantity)?,
            unit_price: Money::from_minor(self.unit_price, currency),
            total_amount: Money::from_minor(self.total_amount, currency),
            project: self.project,
            category: self.category,
            line_order: self.line_order as u32,
        })
    }
}
