//! Cashflow and budget tests
//!
//! Covers amount validation, inflow/outflow aggregation as used by the
//! dashboard, and the degraded-schema null-filling contract.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::types::EntryType;
use shared::validation::{validate_amount, validate_setting_key};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Amounts must be positive regardless of direction
    #[test]
    fn test_amount_validation() {
        assert!(validate_amount(dec("10.50")).is_ok());
        assert!(validate_amount(Decimal::ZERO).is_err());
        assert!(validate_amount(dec("-5")).is_err());
    }

    /// Entry types serialize to the wire strings
    #[test]
    fn test_entry_type_strings() {
        assert_eq!(EntryType::Inflow.as_str(), "inflow");
        assert_eq!(EntryType::Outflow.as_str(), "outflow");
    }

    /// Net cashflow is inflows minus outflows
    #[test]
    fn test_net_cashflow() {
        let entries = [
            (EntryType::Inflow, dec("100")),
            (EntryType::Outflow, dec("30")),
            (EntryType::Inflow, dec("50")),
            (EntryType::Outflow, dec("45")),
        ];

        let net = entries.iter().fold(Decimal::ZERO, |acc, (t, amount)| match t {
            EntryType::Inflow => acc + amount,
            EntryType::Outflow => acc - amount,
        });

        assert_eq!(net, dec("75"));
    }

    /// Entries read from a degraded schema carry null cost and profit
    #[test]
    fn test_degraded_schema_null_fill() {
        // The reduced column set selects NULL::NUMERIC for both fields
        let (cost, profit): (Option<Decimal>, Option<Decimal>) = (None, None);
        assert!(cost.is_none());
        assert!(profit.is_none());
    }

    /// Budget remaining is amount minus spent
    #[test]
    fn test_budget_remaining() {
        let amount = dec("2000");
        let spent = dec("450.25");
        assert_eq!(amount - spent, dec("1549.75"));
    }

    /// Settings keys follow the storage format
    #[test]
    fn test_setting_keys() {
        assert!(validate_setting_key("currency").is_ok());
        assert!(validate_setting_key("dashboard_toggles").is_ok());
        assert!(validate_setting_key("appearance").is_ok());
        assert!(validate_setting_key("Not A Key").is_err());
        assert!(validate_setting_key("").is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    fn entry_strategy() -> impl Strategy<Value = (EntryType, Decimal)> {
        (
            prop_oneof![Just(EntryType::Inflow), Just(EntryType::Outflow)],
            amount_strategy(),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Positive amounts always validate
        #[test]
        fn prop_positive_amounts_valid(amount in amount_strategy()) {
            prop_assert!(validate_amount(amount).is_ok());
        }

        /// Net equals total inflow minus total outflow
        #[test]
        fn prop_net_decomposition(
            entries in prop::collection::vec(entry_strategy(), 0..30)
        ) {
            let total_in: Decimal = entries
                .iter()
                .filter(|(t, _)| *t == EntryType::Inflow)
                .map(|(_, a)| *a)
                .sum();
            let total_out: Decimal = entries
                .iter()
                .filter(|(t, _)| *t == EntryType::Outflow)
                .map(|(_, a)| *a)
                .sum();

            let net = entries.iter().fold(Decimal::ZERO, |acc, (t, a)| match t {
                EntryType::Inflow => acc + a,
                EntryType::Outflow => acc - a,
            });

            prop_assert_eq!(net, total_in - total_out);
        }

        /// Inflow-only histories never have negative net
        #[test]
        fn prop_inflow_only_non_negative(
            amounts in prop::collection::vec(amount_strategy(), 0..30)
        ) {
            let net: Decimal = amounts.iter().sum();
            prop_assert!(net >= Decimal::ZERO);
        }
    }
}
