//! Sanity properties for the shared generators
//!
//! Exercises the proptest strategies together with the builders over the
//! pure pricing path, keeping the generators honest about the invariants
//! they promise.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};
use domain_billing::pricing::{price_entries, InvoiceParameters};
use test_utils::{
    hours_strategy, money_strategy, rate_minor_strategy, tax_rate_strategy, work_date_strategy,
    TemporalFixtures, TestCustomerBuilder, TestEntryBuilder,
};

proptest! {
    #[test]
    fn generated_money_is_never_negative(money in money_strategy()) {
        prop_assert!(!money.is_negative());
    }

    #[test]
    fn generated_hours_are_positive_two_decimal(hours in hours_strategy()) {
        prop_assert!(hours > Decimal::ZERO);
        prop_assert!(hours.scale() <= 2);
    }

    #[test]
    fn generated_inputs_price_into_consistent_invoices(
        inputs in prop::collection::vec((hours_strategy(), rate_minor_strategy()), 1..12),
        tax_rate in tax_rate_strategy(),
        issue_date in work_date_strategy(),
    ) {
        let customer = TestCustomerBuilder::new()
            .with_currency(Currency::USD)
            .build();

        let entries: Vec<_> = inputs
            .iter()
            .map(|(hours, rate)| {
                TestEntryBuilder::for_customer(customer.id)
                    .with_hours(*hours)
                    .with_hourly_rate(Money::from_minor(*rate, Currency::USD))
                    .with_date_worked(issue_date)
                    .build()
            })
            .collect();

        let priced = price_entries(
            &customer,
            &entries,
            InvoiceParameters {
                invoice_number: "INV-PROP".to_string(),
                issue_date,
                due_date: Some(TemporalFixtures::due_date()),
                tax_rate,
                notes: None,
                terms: None,
            },
        )
        .unwrap();

        prop_assert!(priced.invoice.verify_totals().is_ok());
        for item in &priced.line_items {
            prop_assert!(item.verify_total().is_ok());
        }
    }
}
