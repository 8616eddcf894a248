//! Billable entry repository
//!
//! Entry rates are stored as bare minor units; the owning customer's
//! currency is joined in on every read so domain entries come back with
//! fully-typed money.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use core_kernel::{CustomerId, EntryId, InvoiceId, Money};
use domain_billing::BillableEntry;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;
use crate::repositories::convert::{parse_currency, parse_decimal, parse_uuid};

const SELECT_COLUMNS: &str = "SELECT e.id, e.customer_id, e.description, e.project, e.category, \
     e.date_worked, e.hours, e.hourly_rate, e.total_amount, e.is_invoiced, e.invoice_id, \
     e.import_source, e.imported_at, e.created_at, e.updated_at, c.currency \
     FROM billable_entries e JOIN customers c ON c.id = e.customer_id";

/// Repository for billable entries
#[derive(Debug, Clone)]
pub struct EntryRepository {
    pool: DatabasePool,
}

impl EntryRepository {
    /// Creates a new EntryRepository with the given connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Inserts a new billable entry
    pub async fn create(&self, entry: &BillableEntry) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO billable_entries (
                id, customer_id, description, project, category, date_worked, hours,
                hourly_rate, total_amount, is_invoiced, invoice_id, import_source,
                imported_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.id.as_uuid().to_string())
        .bind(entry.customer_id.as_uuid().to_string())
        .bind(&entry.description)
        .bind(&entry.project)
        .bind(&entry.category)
        .bind(entry.date_worked)
        .bind(entry.hours.to_string())
        .bind(entry.hourly_rate.map(|rate| rate.minor()))
        .bind(entry.total_amount.map(|amount| amount.minor()))
        .bind(entry.is_invoiced)
        .bind(entry.invoice_id.map(|id| id.as_uuid().to_string()))
        .bind(&entry.import_source)
        .bind(entry.imported_at)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves an entry by ID
    pub async fn find_by_id(&self, id: EntryId) -> Result<BillableEntry, DatabaseError> {
        let row: Option<EntryRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE e.id = ?"))
            .bind(id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| DatabaseError::not_found("BillableEntry", id))?
            .into_domain()
    }

    /// Retrieves the not-yet-invoiced entries for a customer.
    ///
    /// Entries flagged as invoiced never appear here again; this is the
    /// query the invoice aggregator consumes.
    pub async fn find_unbilled_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<BillableEntry>, DatabaseError> {
        let rows: Vec<EntryRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE e.customer_id = ? AND e.is_invoiced = 0 \
             ORDER BY e.date_worked, e.created_at"
        ))
        .bind(customer_id.as_uuid().to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EntryRow::into_domain).collect()
    }

    /// Lists all entries for a customer, newest first
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<BillableEntry>, DatabaseError> {
        let rows: Vec<EntryRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE e.customer_id = ? ORDER BY e.date_worked DESC, e.created_at DESC"
        ))
        .bind(customer_id.as_uuid().to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EntryRow::into_domain).collect()
    }

    /// Stores a recomputed total amount for an entry
    pub async fn update_total_amount(
        &self,
        id: EntryId,
        total: Money,
    ) -> Result<(), DatabaseError> {
        let result =
            sqlx::query("UPDATE billable_entries SET total_amount = ?, updated_at = ? WHERE id = ?")
                .bind(total.minor())
                .bind(Utc::now())
                .bind(id.as_uuid().to_string())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("BillableEntry", id));
        }
        Ok(())
    }
}

/// Database row for a billable entry, with the customer currency joined in
#[derive(Debug, FromRow)]
struct EntryRow {
    id: String,
    customer_id: String,
    description: String,
    project: Option<String>,
    category: Option<String>,
    date_worked: NaiveDate,
    hours: String,
    hourly_rate: Option<i64>,
    total_amount: Option<i64>,
    is_invoiced: bool,
    invoice_id: Option<String>,
    import_source: Option<String>,
    imported_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    currency: String,
}

impl EntryRow {
    fn into_domain(self) -> Result<BillableEntry, DatabaseError> {
        let currency = parse_currency(&self.currency)?;
        let invoice_id = self
            .invoice_id
            .as_deref()
            .map(parse_uuid)
            .transpose()?
            .map(InvoiceId::from_uuid);

        Ok(BillableEntry {
            id: EntryId::from_uuid(parse_uuid(&self.id)?),
            customer_id: CustomerId::from_uuid(parse_uuid(&self.customer_id)?),
            description: self.description,
            project: self.project,
            category: self.category,
            date_worked: self.date_worked,
            hours: parse_decimal(&self.hours)?,
            hourly_rate: self.hourly_rate.map(|minor| Money::from_minor(minor, currency)),
            total_amount: self.total_amount.map(|minor| Money::from_minor(minor, currency)),
            is_invoiced: self.is_invoiced,
            invoice_id,
            import_source: self.import_source,
            imported_at: self.imported_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
