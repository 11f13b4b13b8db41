//! WebAssembly module for Kitchen Ledger
//!
//! Provides client-side computation for:
//! - Ingredient and recipe unit costs
//! - Margin and batch profit
//! - Fixed-cost impact estimates
//!
//! These mirror the backend's derived metrics so views can recompute on
//! every input change without a round trip.

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::costing::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

/// Per-unit cost of an ingredient from its package pricing
#[wasm_bindgen]
pub fn calc_ingredient_unit_cost(package_price: f64, package_qty: f64) -> f64 {
    to_f64(ingredient_unit_cost(
        to_decimal(package_price),
        to_decimal(package_qty),
    ))
}

/// Per-unit cost of a recipe batch
#[wasm_bindgen]
pub fn calc_recipe_unit_cost(total_cost: f64, yield_units: f64) -> f64 {
    to_f64(recipe_unit_cost(
        to_decimal(total_cost),
        to_decimal(yield_units),
    ))
}

/// Unit cost including the per-batch fixed cost share
#[wasm_bindgen]
pub fn calc_full_unit_cost(total_cost: f64, yield_units: f64, per_batch_fixed: f64) -> f64 {
    to_f64(full_unit_cost(
        to_decimal(total_cost),
        to_decimal(yield_units),
        to_decimal(per_batch_fixed),
    ))
}

/// Gross margin percentage; NaN when the price is not positive
#[wasm_bindgen]
pub fn calc_gross_margin(price: f64, unit_cost: f64) -> f64 {
    match gross_margin_percent(to_decimal(price), to_decimal(unit_cost)) {
        Some(margin) => to_f64(margin),
        None => f64::NAN,
    }
}

/// Profit for one full batch at the given price
#[wasm_bindgen]
pub fn calc_batch_profit(price: f64, unit_cost: f64, yield_units: f64) -> f64 {
    to_f64(batch_profit(
        to_decimal(price),
        to_decimal(unit_cost),
        to_decimal(yield_units),
    ))
}

/// Estimated per-unit burden of a fixed cost; NaN when the allocation
/// method has no per-unit reading
#[wasm_bindgen]
pub fn calc_fixed_cost_unit_impact(value: f64, method: &str, avg_yield: f64) -> f64 {
    let Some(method) = AllocationMethod::parse(method) else {
        return f64::NAN;
    };
    match fixed_cost_unit_impact(to_decimal(value), method, to_decimal(avg_yield)) {
        Some(impact) => to_f64(impact),
        None => f64::NAN,
    }
}

/// Full profitability breakdown as a JSON string
#[wasm_bindgen]
pub fn calc_profitability(
    total_cost: f64,
    yield_units: f64,
    per_batch_fixed: f64,
    price: f64,
) -> Result<String, JsValue> {
    let breakdown = profitability(
        to_decimal(total_cost),
        to_decimal(yield_units),
        to_decimal(per_batch_fixed),
        to_decimal(price),
    );

    serde_json::to_string(&breakdown)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Validate a recipe draft before submission
#[wasm_bindgen]
pub fn validate_recipe_draft(name: &str, yield_units: f64, line_count: u32) -> bool {
    // Per-line checks happen server-side; this gates the obvious rejects
    !name.trim().is_empty() && yield_units > 0.0 && line_count > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cost() {
        let unit = calc_ingredient_unit_cost(30.0, 25.0);
        assert!((unit - 1.2).abs() < 0.001);
    }

    #[test]
    fn test_margin() {
        let margin = calc_gross_margin(10.0, 6.0);
        assert!((margin - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_margin_undefined() {
        assert!(calc_gross_margin(0.0, 6.0).is_nan());
    }

    #[test]
    fn test_batch_profit() {
        let profit = calc_batch_profit(10.0, 6.0, 20.0);
        assert!((profit - 80.0).abs() < 0.001);
    }

    #[test]
    fn test_unit_impact_by_method() {
        let per_batch = calc_fixed_cost_unit_impact(50.0, "per_batch", 25.0);
        assert!((per_batch - 2.0).abs() < 0.001);

        assert!(calc_fixed_cost_unit_impact(50.0, "one_time", 25.0).is_nan());
        assert!(calc_fixed_cost_unit_impact(50.0, "bogus", 25.0).is_nan());
    }

    #[test]
    fn test_recipe_draft_validation() {
        assert!(validate_recipe_draft("Sourdough", 12.0, 3));
        assert!(!validate_recipe_draft("", 12.0, 3));
        assert!(!validate_recipe_draft("Sourdough", 0.0, 3));
        assert!(!validate_recipe_draft("Sourdough", 12.0, 0));
    }

    fn as_number(value: &serde_json::Value) -> f64 {
        match value {
            serde_json::Value::String(s) => s.parse().unwrap(),
            other => other.as_f64().unwrap(),
        }
    }

    #[test]
    fn test_profitability_json() {
        let json = calc_profitability(100.0, 20.0, 20.0, 10.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!((as_number(&value["full_unit_cost"]) - 6.0).abs() < 0.001);
        assert!((as_number(&value["batch_profit"]) - 80.0).abs() < 0.001);
    }
}
