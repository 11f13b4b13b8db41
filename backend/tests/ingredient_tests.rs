//! Ingredient validation and unit cost tests

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::costing::ingredient_unit_cost;
use shared::validation::validate_ingredient;

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

    /// unitCost == packagePrice / packageQty
    #[test]
    fn test_unit_cost_derivation() {
        // 25 kg bag of flour at 30.00
        assert_eq!(ingredient_unit_cost(dec("30.00"), dec("25")), dec("1.2"));
    }

    /// Zero package quantity degrades to a zero unit cost
    #[test]
    fn test_zero_package_qty() {
        assert_eq!(ingredient_unit_cost(dec("30.00"), Decimal::ZERO), Decimal::ZERO);
    }

    /// Placeholder ingredients created by recipe resolution carry zero cost
    #[test]
    fn test_placeholder_ingredient_cost() {
        // package_price 0, package_qty 1
        assert_eq!(ingredient_unit_cost(Decimal::ZERO, Decimal::ONE), Decimal::ZERO);
    }

    /// Name and package quantity validation
    #[test]
    fn test_ingredient_validation() {
        assert!(validate_ingredient("Flour", dec("25")).is_ok());
        assert!(validate_ingredient("", dec("25")).is_err());
        assert!(validate_ingredient("   ", dec("25")).is_err());
        assert!(validate_ingredient("Flour", Decimal::ZERO).is_err());
        assert!(validate_ingredient("Flour", dec("-5")).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    fn qty_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100_000i64).prop_map(|n| Decimal::new(n, 1))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The write-time invariant: deriving the unit cost from an exact
        /// package price recovers it
        #[test]
        fn prop_unit_cost_invariant(unit_cost in price_strategy(), qty in qty_strategy()) {
            let package_price = unit_cost * qty;
            prop_assert_eq!(ingredient_unit_cost(package_price, qty), unit_cost);
        }

        /// Unit cost is never negative for non-negative prices
        #[test]
        fn prop_unit_cost_non_negative(price in price_strategy(), qty in qty_strategy()) {
            prop_assert!(ingredient_unit_cost(price, qty) >= Decimal::ZERO);
        }

        /// Larger packages at the same price always cost less per unit
        #[test]
        fn prop_bulk_discount(
            price in (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2)),
            qty in qty_strategy(),
            extra in qty_strategy()
        ) {
            let small = ingredient_unit_cost(price, qty);
            let large = ingredient_unit_cost(price, qty + extra);
            prop_assert!(large < small);
        }
    }
}
