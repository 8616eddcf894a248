//! Tests for the customer domain

use core_kernel::{Currency, Money};
use domain_customer::{Customer, CustomerError};

mod lifecycle {
    use super::*;

    #[test]
    fn test_new_customer_is_active() {
        let customer = Customer::new("Acme Corp", Currency::USD);
        assert!(customer.is_active);
        assert_eq!(customer.name, "Acme Corp");
        assert_eq!(customer.currency, Currency::USD);
        assert!(customer.default_hourly_rate.is_none());
    }

    #[test]
    fn test_deactivate_is_a_soft_delete() {
        let mut customer = Customer::new("Acme Corp", Currency::USD);
        customer.deactivate();
        assert!(!customer.is_active);

        customer.reactivate();
        assert!(customer.is_active);
    }

    #[test]
    fn test_builder_style_setters() {
        let customer = Customer::new("Bright Sp. z o.o.", Currency::PLN)
            .with_email("billing@bright.pl")
            .with_phone("+48 22 123 45 67")
            .with_tax_id("7281339661")
            .with_contact_person("Magdalena Nowak")
            .with_default_hourly_rate(Money::from_minor(40000, Currency::PLN));

        assert_eq!(customer.email.as_deref(), Some("billing@bright.pl"));
        assert_eq!(customer.tax_id.as_deref(), Some("7281339661"));
        assert_eq!(
            customer.default_hourly_rate,
            Some(Money::from_minor(40000, Currency::PLN))
        );
    }
}

mod validation {
    use super::*;

    #[test]
    fn test_valid_customer_passes() {
        let customer = Customer::new("Acme Corp", Currency::USD)
            .with_email("ap@acme.example")
            .with_default_hourly_rate(Money::from_minor(5000, Currency::USD));
        assert!(customer.ensure_valid().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let customer = Customer::new("", Currency::USD);
        assert!(matches!(
            customer.ensure_valid(),
            Err(CustomerError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let customer = Customer::new("Acme Corp", Currency::USD).with_email("not-an-email");
        assert!(matches!(
            customer.ensure_valid(),
            Err(CustomerError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let customer = Customer::new("Acme Corp", Currency::USD)
            .with_default_hourly_rate(Money::from_minor(-100, Currency::USD));
        assert!(matches!(
            customer.ensure_valid(),
            Err(CustomerError::InvalidData(_))
        ));
    }

    #[test]
    fn test_rate_currency_must_match_customer_currency() {
        let customer = Customer::new("Acme Corp", Currency::USD)
            .with_default_hourly_rate(Money::from_minor(5000, Currency::EUR));
        assert!(matches!(
            customer.ensure_valid(),
            Err(CustomerError::InvalidData(_))
        ));
    }

    #[test]
    fn test_zero_rate_is_allowed() {
        // Zero-rate customers price entries at zero, which is valid
        let customer = Customer::new("Pro Bono Client", Currency::USD)
            .with_default_hourly_rate(Money::zero(Currency::USD));
        assert!(customer.ensure_valid().is_ok());
    }
}

mod address {
    use super::*;

    #[test]
    fn test_formatted_address_joins_all_parts() {
        let customer = Customer::new("Acme Corp", Currency::USD).with_address(
            "123 Business St",
            "Springfield",
            Some("IL".to_string()),
            Some("62704".to_string()),
            Some("USA".to_string()),
        );

        assert_eq!(
            customer.formatted_address(),
            "123 Business St, Springfield, IL 62704, USA"
        );
    }

    #[test]
    fn test_formatted_address_skips_missing_parts() {
        let customer = Customer::new("Acme Corp", Currency::USD).with_address(
            "ul. Obrzetska 1a",
            "Warszawa",
            None,
            Some("02-691".to_string()),
            None,
        );

        assert_eq!(customer.formatted_address(), "ul. Obrzetska 1a, Warszawa, 02-691");
    }

    #[test]
    fn test_formatted_address_empty_when_no_parts() {
        let customer = Customer::new("Acme Corp", Currency::USD);
        assert_eq!(customer.formatted_address(), "");
    }
}
