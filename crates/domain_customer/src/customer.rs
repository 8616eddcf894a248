//! Customer entity
//!
//! A customer is the invoiced party: the business or person billable hours
//! are tracked against and invoices are issued to. Customers carry the
//! billing defaults (hourly rate, currency) that pricing falls back to when
//! an entry has no rate of its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{Currency, CustomerId, Money};

use crate::error::CustomerError;

/// The invoiced party
///
/// Lifecycle: created by the external caller, soft-deleted via the
/// `is_active` flag. There is no hard delete; historical invoices keep
/// referencing deactivated customers.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// Display name
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Contact email
    #[validate(email)]
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Tax identifier (EIN, NIP, VAT ID, ...)
    pub tax_id: Option<String>,
    /// Contact person
    pub contact_person: Option<String>,
    /// Default hourly rate in minor units; entries without their own rate
    /// fall back to this
    pub default_hourly_rate: Option<Money>,
    /// Invoicing currency
    pub currency: Currency,
    /// Soft-delete flag
    pub is_active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new active customer with the given name and currency
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        let now = Utc::now();
        Self {
            id: CustomerId::new_v7(),
            name: name.into(),
            email: None,
            phone: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            tax_id: None,
            contact_person: None,
            default_hourly_rate: None,
            currency,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the contact email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the contact phone
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the postal address components
    pub fn with_address(
        mut self,
        address: impl Into<String>,
        city: impl Into<String>,
        state: Option<String>,
        postal_code: Option<String>,
        country: Option<String>,
    ) -> Self {
        self.address = Some(address.into());
        self.city = Some(city.into());
        self.state = state;
        self.postal_code = postal_code;
        self.country = country;
        self
    }

    /// Sets the tax identifier
    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = Some(tax_id.into());
        self
    }

    /// Sets the contact person
    pub fn with_contact_person(mut self, contact_person: impl Into<String>) -> Self {
        self.contact_person = Some(contact_person.into());
        self
    }

    /// Sets the default hourly rate
    pub fn with_default_hourly_rate(mut self, rate: Money) -> Self {
        self.default_hourly_rate = Some(rate);
        self
    }

    /// Soft-deletes the customer
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Reactivates a soft-deleted customer
    pub fn reactivate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Checks field-level validity plus the rate invariant
    ///
    /// The default hourly rate, if present, must be non-negative and
    /// denominated in the customer's invoicing currency.
    pub fn ensure_valid(&self) -> Result<(), CustomerError> {
        self.validate().map_err(|e| {
            CustomerError::validation_failed(
                e.field_errors()
                    .into_iter()
                    .map(|(field, errors)| {
                        let detail = errors
                            .iter()
                            .filter_map(|err| err.message.as_deref())
                            .collect::<Vec<_>>()
                            .join(", ");
                        format!("{field}: {detail}")
                    })
                    .collect(),
            )
        })?;

        if let Some(rate) = &self.default_hourly_rate {
            if rate.is_negative() {
                return Err(CustomerError::invalid("default hourly rate must be non-negative"));
            }
            if rate.currency() != self.currency {
                return Err(CustomerError::invalid(format!(
                    "default hourly rate currency {} does not match customer currency {}",
                    rate.currency(),
                    self.currency
                )));
            }
        }

        Ok(())
    }

    /// Returns the address components joined into a single display string
    ///
    /// Empty components are skipped; state and postal code share a segment.
    pub fn formatted_address(&self) -> String {
        let state_zip = match (self.state.as_deref(), self.postal_code.as_deref()) {
            (Some(state), Some(zip)) => Some(format!("{state} {zip}")),
            (Some(state), None) => Some(state.to_string()),
            (None, Some(zip)) => Some(zip.to_string()),
            (None, None) => None,
        };

        [
            self.address.clone(),
            self.city.clone(),
            state_zip,
            self.country.clone(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}
