//! Customer repository

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use core_kernel::{CustomerId, Money};
use domain_customer::Customer;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;
use crate::repositories::convert::{parse_currency, parse_uuid};

const SELECT_COLUMNS: &str = "SELECT id, name, email, phone, address, city, state, postal_code, \
     country, tax_id, contact_person, default_hourly_rate, currency, is_active, created_at, \
     updated_at FROM customers";

/// Repository for customer records
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: DatabasePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Inserts a new customer
    pub async fn create(&self, customer: &Customer) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO customers (
                id, name, email, phone, address, city, state, postal_code, country,
                tax_id, contact_person, default_hourly_rate, currency, is_active,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(customer.id.as_uuid().to_string())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(&customer.postal_code)
        .bind(&customer.country)
        .bind(&customer.tax_id)
        .bind(&customer.contact_person)
        .bind(customer.default_hourly_rate.map(|rate| rate.minor()))
        .bind(customer.currency.code())
        .bind(customer.is_active)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a customer by ID
    pub async fn find_by_id(&self, id: CustomerId) -> Result<Customer, DatabaseError> {
        let row: Option<CustomerRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?"))
                .bind(id.as_uuid().to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.ok_or_else(|| DatabaseError::not_found("Customer", id))?
            .into_domain()
    }

    /// Lists all active customers, ordered by name
    pub async fn list_active(&self) -> Result<Vec<Customer>, DatabaseError> {
        let rows: Vec<CustomerRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE is_active = 1 ORDER BY name"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(CustomerRow::into_domain).collect()
    }

    /// Updates an existing customer
    pub async fn update(&self, customer: &Customer) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE customers SET
                name = ?, email = ?, phone = ?, address = ?, city = ?, state = ?,
                postal_code = ?, country = ?, tax_id = ?, contact_person = ?,
                default_hourly_rate = ?, currency = ?, is_active = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(&customer.postal_code)
        .bind(&customer.country)
        .bind(&customer.tax_id)
        .bind(&customer.contact_person)
        .bind(customer.default_hourly_rate.map(|rate| rate.minor()))
        .bind(customer.currency.code())
        .bind(customer.is_active)
        .bind(Utc::now())
        .bind(customer.id.as_uuid().to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Customer", customer.id));
        }
        Ok(())
    }

    /// Soft-deletes a customer by clearing its active flag
    pub async fn deactivate(&self, id: CustomerId) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE customers SET is_active = 0, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id.as_uuid().to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Customer", id));
        }
        Ok(())
    }
}

/// Database row for a customer
#[derive(Debug, FromRow)]
struct CustomerRow {
    id: String,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    tax_id: Option<String>,
    contact_person: Option<String>,
    default_hourly_rate: Option<i64>,
    currency: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_domain(self) -> Result<Customer, DatabaseError> {
        let currency = parse_currency(&self.currency)?;
        Ok(Customer {
            id: CustomerId::from_uuid(parse_uuid(&self.id)?),
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
            tax_id: self.tax_id,
            contact_person: self.contact_person,
            default_hourly_rate: self
                .default_hourly_rate
                .map(|minor| Money::from_minor(minor, currency)),
            currency,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
