//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant
//! fields while using defaults for everything else.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, CustomerId, Money};
use domain_billing::BillableEntry;
use domain_customer::Customer;

use crate::fixtures::{MoneyFixtures, TemporalFixtures};

/// Builder for constructing test customers
pub struct TestCustomerBuilder {
    name: String,
    currency: Currency,
    email: Option<String>,
    tax_id: Option<String>,
    contact_person: Option<String>,
    default_hourly_rate: Option<Money>,
}

impl Default for TestCustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCustomerBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            name: "Acme Corp".to_string(),
            currency: Currency::USD,
            email: Some("ap@acme.example".to_string()),
            tax_id: Some("12-3456789".to_string()),
            contact_person: None,
            default_hourly_rate: Some(MoneyFixtures::usd_rate()),
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the invoicing currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the contact email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
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

    /// Clears the default hourly rate (zero-rate customer scenarios)
    pub fn without_default_hourly_rate(mut self) -> Self {
        self.default_hourly_rate = None;
        self
    }

    /// Builds the customer
    pub fn build(self) -> Customer {
        let mut customer = Customer::new(self.name, self.currency);
        customer.email = self.email;
        customer.tax_id = self.tax_id;
        customer.contact_person = self.contact_person;
        customer.default_hourly_rate = self.default_hourly_rate;
        customer
    }
}

/// Builder for constructing test billable entries
pub struct TestEntryBuilder {
    customer_id: CustomerId,
    description: String,
    date_worked: NaiveDate,
    hours: Decimal,
    hourly_rate: Option<Money>,
    project: Option<String>,
    category: Option<String>,
}

impl TestEntryBuilder {
    /// Creates a builder for the given customer with default values
    pub fn for_customer(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            description: "Consulting hours".to_string(),
            date_worked: TemporalFixtures::work_date(),
            hours: dec!(1.00),
            hourly_rate: None,
            project: None,
            category: None,
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the work date
    pub fn with_date_worked(mut self, date: NaiveDate) -> Self {
        self.date_worked = date;
        self
    }

    /// Sets the hours worked
    pub fn with_hours(mut self, hours: Decimal) -> Self {
        self.hours = hours;
        self
    }

    /// Sets an entry-specific hourly rate
    pub fn with_hourly_rate(mut self, rate: Money) -> Self {
        self.hourly_rate = Some(rate);
        self
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

    /// Builds the entry
    pub fn build(self) -> BillableEntry {
        let mut entry = BillableEntry::new(
            self.customer_id,
            self.description,
            self.date_worked,
            self.hours,
        );
        entry.hourly_rate = self.hourly_rate;
        entry.project = self.project;
        entry.category = self.category;
        entry
    }
}
