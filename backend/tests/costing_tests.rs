//! Costing and profitability tests
//!
//! Covers the derived-metric invariants:
//! - ingredient unit cost always equals package price / package quantity
//! - recipe unit cost always equals total cost / yield
//! - margin, gross profit, and batch profit arithmetic

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::costing::{
    batch_profit, fixed_cost_batch_impact, fixed_cost_unit_impact, full_unit_cost,
    gross_margin_percent, gross_profit, ingredient_unit_cost, profitability, recipe_total_cost,
    recipe_unit_cost,
};
use shared::types::AllocationMethod;

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

    /// Margin calculation: price=10, unitCost=6 => margin=40%, grossProfit=4
    #[test]
    fn test_margin_example() {
        assert_eq!(gross_margin_percent(dec("10"), dec("6")), Some(dec("40")));
        assert_eq!(gross_profit(dec("10"), dec("6")), dec("4"));
    }

    /// Batch profit: grossProfit=4, yield=20 => batchProfit=80
    #[test]
    fn test_batch_profit_example() {
        assert_eq!(batch_profit(dec("10"), dec("6"), dec("20")), dec("80"));
    }

    /// Unit cost of a recipe is total cost over yield
    #[test]
    fn test_recipe_unit_cost() {
        assert_eq!(recipe_unit_cost(dec("150"), dec("30")), dec("5"));
    }

    /// Zero or negative yield yields a zero unit cost rather than a division error
    #[test]
    fn test_recipe_unit_cost_zero_yield() {
        assert_eq!(recipe_unit_cost(dec("150"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(recipe_unit_cost(dec("150"), dec("-2")), Decimal::ZERO);
    }

    /// Per-batch fixed costs are spread across the batch yield
    #[test]
    fn test_full_unit_cost() {
        // 150 variable + 30 per-batch fixed over 30 units = 6 per unit
        assert_eq!(full_unit_cost(dec("150"), dec("30"), dec("30")), dec("6"));
    }

    /// Total cost accumulates quantity times unit cost per line
    #[test]
    fn test_recipe_total_cost() {
        let lines = [(dec("2"), dec("3.5")), (dec("4"), dec("0.25"))];
        assert_eq!(recipe_total_cost(&lines), dec("8"));
    }

    /// Margin is undefined at a non-positive price
    #[test]
    fn test_margin_undefined() {
        assert_eq!(gross_margin_percent(Decimal::ZERO, dec("6")), None);
    }

    /// Negative margin when the unit cost exceeds the price
    #[test]
    fn test_negative_margin() {
        let margin = gross_margin_percent(dec("5"), dec("10")).unwrap();
        assert_eq!(margin, dec("-100"));
    }

    /// Impact estimates follow the allocation method
    #[test]
    fn test_fixed_cost_impacts() {
        let avg_yield = dec("25");

        assert_eq!(
            fixed_cost_unit_impact(dec("3"), AllocationMethod::PerUnit, avg_yield),
            Some(dec("3"))
        );
        assert_eq!(
            fixed_cost_unit_impact(dec("50"), AllocationMethod::PerBatch, avg_yield),
            Some(dec("2"))
        );
        assert_eq!(
            fixed_cost_batch_impact(dec("3"), AllocationMethod::PerUnit, avg_yield),
            Some(dec("75"))
        );

        // No defensible per-unit reading for these methods
        assert_eq!(
            fixed_cost_unit_impact(dec("500"), AllocationMethod::OneTime, avg_yield),
            None
        );
        assert_eq!(
            fixed_cost_unit_impact(dec("500"), AllocationMethod::PerHour, avg_yield),
            None
        );
    }

    /// Breakdown ties all the pieces together
    #[test]
    fn test_profitability_breakdown() {
        let b = profitability(dec("100"), dec("20"), dec("20"), dec("10"));
        assert_eq!(b.full_unit_cost, dec("6"));
        assert_eq!(b.gross_margin_percent, Some(dec("40")));
        assert_eq!(b.batch_profit, dec("80"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating money amounts (0.01 to 10000.00)
    fn money_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    /// Strategy for generating positive yields
    fn yield_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10_000i64).prop_map(Decimal::from)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// unitCost == packagePrice / packageQty for any positive package
        #[test]
        fn prop_ingredient_unit_cost_invariant(
            price in money_strategy(),
            qty in yield_strategy()
        ) {
            prop_assert_eq!(ingredient_unit_cost(price, qty), price / qty);
        }

        /// unitCost == totalCost / yield for any positive yield
        #[test]
        fn prop_recipe_unit_cost_invariant(
            total in money_strategy(),
            yield_units in yield_strategy()
        ) {
            prop_assert_eq!(recipe_unit_cost(total, yield_units), total / yield_units);
        }

        /// Batch profit equals per-unit profit times yield
        #[test]
        fn prop_batch_profit_scaling(
            price in money_strategy(),
            cost in money_strategy(),
            yield_units in yield_strategy()
        ) {
            let per_unit = gross_profit(price, cost);
            prop_assert_eq!(batch_profit(price, cost, yield_units), per_unit * yield_units);
        }

        /// Margin and profit agree in sign
        #[test]
        fn prop_margin_profit_sign_agreement(
            price in money_strategy(),
            cost in money_strategy()
        ) {
            let margin = gross_margin_percent(price, cost).unwrap();
            let profit = gross_profit(price, cost);

            prop_assert_eq!(margin > Decimal::ZERO, profit > Decimal::ZERO);
            prop_assert_eq!(margin == Decimal::ZERO, profit == Decimal::ZERO);
        }

        /// Adding per-batch fixed costs never reduces the unit cost
        #[test]
        fn prop_fixed_share_never_reduces_cost(
            total in money_strategy(),
            yield_units in yield_strategy(),
            fixed in money_strategy()
        ) {
            let without = full_unit_cost(total, yield_units, Decimal::ZERO);
            let with = full_unit_cost(total, yield_units, fixed);
            prop_assert!(with >= without);
        }

        /// Total cost is order-independent
        #[test]
        fn prop_total_cost_commutative(
            lines in prop::collection::vec(
                (money_strategy(), money_strategy()),
                1..10
            )
        ) {
            let mut reversed = lines.clone();
            reversed.reverse();
            prop_assert_eq!(recipe_total_cost(&lines), recipe_total_cost(&reversed));
        }

        /// Per-batch impact divided over the batch matches the per-unit impact
        #[test]
        fn prop_per_batch_impact_consistent(
            per_unit in money_strategy(),
            avg_yield in yield_strategy()
        ) {
            let value = per_unit * avg_yield;
            let unit = fixed_cost_unit_impact(value, AllocationMethod::PerBatch, avg_yield).unwrap();
            prop_assert_eq!(unit, per_unit);
        }
    }
}
