//! Pure costing and profitability calculations
//!
//! All functions here are side-effect free and shared between the backend
//! reporting service and the browser (via WASM). Money values use
//! `rust_decimal::Decimal` to avoid float drift in price arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::AllocationMethod;

/// Assumed production days per month when spreading a monthly fixed cost
/// over daily batches. Used only for the per-unit impact estimate.
pub const PRODUCTION_DAYS_PER_MONTH: u32 = 30;

/// Per-unit purchase cost of an ingredient: package price divided by
/// package quantity. Zero when the package quantity is not positive.
pub fn ingredient_unit_cost(package_price: Decimal, package_qty: Decimal) -> Decimal {
    if package_qty <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    package_price / package_qty
}

/// Total variable cost of a recipe batch from its resolved lines.
///
/// Each line is (quantity, ingredient unit cost).
pub fn recipe_total_cost(lines: &[(Decimal, Decimal)]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |acc, (qty, unit_cost)| acc + qty * unit_cost)
}

/// Cost attributed to one produced unit. Zero when yield is not positive.
pub fn recipe_unit_cost(total_cost: Decimal, yield_units: Decimal) -> Decimal {
    if yield_units <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    total_cost / yield_units
}

/// Unit cost including the pro-rated share of per-batch fixed costs.
pub fn full_unit_cost(
    total_cost: Decimal,
    yield_units: Decimal,
    per_batch_fixed_total: Decimal,
) -> Decimal {
    if yield_units <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (total_cost + per_batch_fixed_total) / yield_units
}

/// Gross margin as a percentage of the sale price.
///
/// `None` when the price is not positive (margin is undefined).
pub fn gross_margin_percent(price: Decimal, unit_cost: Decimal) -> Option<Decimal> {
    if price <= Decimal::ZERO {
        return None;
    }
    Some((price - unit_cost) / price * Decimal::from(100))
}

/// Profit per produced unit at the given sale price.
pub fn gross_profit(price: Decimal, unit_cost: Decimal) -> Decimal {
    price - unit_cost
}

/// Profit for one full batch at the given sale price.
pub fn batch_profit(price: Decimal, unit_cost: Decimal, yield_units: Decimal) -> Decimal {
    (price - unit_cost) * yield_units
}

/// Estimated per-unit burden of a fixed cost.
///
/// This is a proportional estimate, not an exact allocation: `avg_yield` is
/// the average batch yield across recipes and stands in for real production
/// volume. Methods with no defensible per-unit reading (per-hour without
/// labor data, one-time costs) return `None`.
pub fn fixed_cost_unit_impact(
    value: Decimal,
    method: AllocationMethod,
    avg_yield: Decimal,
) -> Option<Decimal> {
    match method {
        AllocationMethod::PerUnit => Some(value),
        AllocationMethod::PerBatch => {
            if avg_yield <= Decimal::ZERO {
                None
            } else {
                Some(value / avg_yield)
            }
        }
        AllocationMethod::Monthly => {
            let monthly_units = avg_yield * Decimal::from(PRODUCTION_DAYS_PER_MONTH);
            if monthly_units <= Decimal::ZERO {
                None
            } else {
                Some(value / monthly_units)
            }
        }
        AllocationMethod::PerHour | AllocationMethod::OneTime => None,
    }
}

/// Estimated per-batch burden of a fixed cost. Same caveats as
/// [`fixed_cost_unit_impact`].
pub fn fixed_cost_batch_impact(
    value: Decimal,
    method: AllocationMethod,
    avg_yield: Decimal,
) -> Option<Decimal> {
    match method {
        AllocationMethod::PerBatch => Some(value),
        AllocationMethod::PerUnit => Some(value * avg_yield),
        AllocationMethod::Monthly => {
            // One batch per production day.
            Some(value / Decimal::from(PRODUCTION_DAYS_PER_MONTH))
        }
        AllocationMethod::PerHour | AllocationMethod::OneTime => None,
    }
}

/// Full profitability snapshot for a recipe at a given sale price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitabilityBreakdown {
    pub unit_cost: Decimal,
    pub per_batch_fixed_share: Decimal,
    pub full_unit_cost: Decimal,
    pub gross_margin_percent: Option<Decimal>,
    pub gross_profit: Decimal,
    pub batch_profit: Decimal,
}

/// Compute the complete profitability breakdown for a recipe.
pub fn profitability(
    total_cost: Decimal,
    yield_units: Decimal,
    per_batch_fixed_total: Decimal,
    price: Decimal,
) -> ProfitabilityBreakdown {
    let unit_cost = recipe_unit_cost(total_cost, yield_units);
    let full = full_unit_cost(total_cost, yield_units, per_batch_fixed_total);
    ProfitabilityBreakdown {
        unit_cost,
        per_batch_fixed_share: full - unit_cost,
        full_unit_cost: full,
        gross_margin_percent: gross_margin_percent(price, full),
        gross_profit: gross_profit(price, full),
        batch_profit: batch_profit(price, full, yield_units),
    }
}
