//! Reporting service for dashboard aggregates and recipe profitability

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use shared::costing::{
    fixed_cost_batch_impact, fixed_cost_unit_impact, profitability, ProfitabilityBreakdown,
};

use crate::error::{AppError, AppResult};
use crate::services::fixed_cost::FixedCost;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Dashboard metrics
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub ingredient_count: i64,
    pub low_stock_count: i64,
    pub stock_value: Decimal,
    pub recipe_count: i64,
    pub budgeted_recipe_count: i64,
    pub monthly_fixed_costs: Decimal,
    pub cashflow_in: Decimal,
    pub cashflow_out: Decimal,
    pub cashflow_net: Decimal,
}

/// Profitability report for one recipe at a caller-supplied sale price
#[derive(Debug, Serialize)]
pub struct RecipeProfitability {
    pub recipe_id: Uuid,
    pub recipe_name: String,
    pub yield_units: Decimal,
    pub price: Decimal,
    #[serde(flatten)]
    pub breakdown: ProfitabilityBreakdown,
    /// Heuristic per-unit/per-batch burden of each fixed cost; estimates,
    /// not exact allocations
    pub fixed_cost_impacts: Vec<FixedCostImpact>,
}

/// Estimated burden of a single fixed cost
#[derive(Debug, Serialize)]
pub struct FixedCostImpact {
    pub fixed_cost_id: Uuid,
    pub name: String,
    pub allocation_method: String,
    pub unit_impact_estimate: Option<Decimal>,
    pub batch_impact_estimate: Option<Decimal>,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get dashboard metrics
    pub async fn get_dashboard_metrics(&self) -> AppResult<DashboardMetrics> {
        // Ingredient counts and stock value
        let (ingredient_count, low_stock_count, stock_value): (i64, i64, Decimal) =
            sqlx::query_as(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE stock_qty <= low_stock_threshold),
                       COALESCE(SUM(stock_qty * unit_cost), 0)
                FROM ingredients
                "#,
            )
            .fetch_one(&self.db)
            .await?;

        // Recipe counts
        let (recipe_count, budgeted_recipe_count): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE include_in_budget)
            FROM recipes
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        // Monthly fixed cost total
        let monthly_fixed_costs: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(value), 0) FROM fixed_costs WHERE allocation_method = 'monthly'",
        )
        .fetch_one(&self.db)
        .await?;

        // Cashflow totals
        let (cashflow_in, cashflow_out): (Decimal, Decimal) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount) FILTER (WHERE entry_type = 'inflow'), 0),
                   COALESCE(SUM(amount) FILTER (WHERE entry_type = 'outflow'), 0)
            FROM cashflow_entries
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(DashboardMetrics {
            ingredient_count,
            low_stock_count,
            stock_value,
            recipe_count,
            budgeted_recipe_count,
            monthly_fixed_costs,
            cashflow_in,
            cashflow_out,
            cashflow_net: cashflow_in - cashflow_out,
        })
    }

    /// Get the profitability report for a recipe at a given sale price
    pub async fn get_recipe_profitability(
        &self,
        recipe_id: Uuid,
        price: Decimal,
    ) -> AppResult<RecipeProfitability> {
        if price <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "price".to_string(),
                message: "Price must be positive".to_string(),
            });
        }

        let (recipe_name, yield_units, total_cost) =
            sqlx::query_as::<_, (String, Decimal, Decimal)>(
                "SELECT name, yield_units, total_cost FROM recipes WHERE id = $1",
            )
            .bind(recipe_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Recipe".to_string()))?;

        let per_batch_fixed_total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(value), 0) FROM fixed_costs WHERE allocation_method = 'per_batch'",
        )
        .fetch_one(&self.db)
        .await?;

        // Average batch yield stands in for real production volume in the
        // impact estimates
        let avg_yield: Decimal =
            sqlx::query_scalar("SELECT COALESCE(AVG(yield_units), 0) FROM recipes")
                .fetch_one(&self.db)
                .await?;

        let fixed_costs = sqlx::query_as::<_, FixedCost>(
            r#"
            SELECT id, name, cost_type, value, allocation_method, created_at, updated_at
            FROM fixed_costs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let fixed_cost_impacts = fixed_costs
            .into_iter()
            .map(|fc| {
                let (unit_impact, batch_impact) = match fc.allocation() {
                    Some(method) => (
                        fixed_cost_unit_impact(fc.value, method, avg_yield),
                        fixed_cost_batch_impact(fc.value, method, avg_yield),
                    ),
                    None => (None, None),
                };
                FixedCostImpact {
                    fixed_cost_id: fc.id,
                    name: fc.name,
                    allocation_method: fc.allocation_method,
                    unit_impact_estimate: unit_impact,
                    batch_impact_estimate: batch_impact,
                }
            })
            .collect();

        Ok(RecipeProfitability {
            recipe_id,
            recipe_name,
            yield_units,
            price,
            breakdown: profitability(total_cost, yield_units, per_batch_fixed_total, price),
            fixed_cost_impacts,
        })
    }

    /// Render records as CSV under an explicit header row.
    ///
    /// The header is written even when there are no records, so an empty
    /// export is still a well-formed CSV document.
    pub fn export_to_csv<T: Serialize>(headers: &[&str], records: &[T]) -> AppResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);

        writer
            .write_record(headers)
            .map_err(|e| AppError::Internal(format!("CSV write error: {}", e)))?;
        for record in records {
            writer
                .serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV write error: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: String,
        value: i32,
    }

    #[test]
    fn test_csv_empty_export_keeps_header() {
        let csv = ReportingService::export_to_csv::<Row>(&["name", "value"], &[]).unwrap();
        assert_eq!(csv, "name,value\n");
    }

    #[test]
    fn test_csv_rows_follow_header() {
        let rows = [
            Row {
                name: "flour".to_string(),
                value: 25,
            },
            Row {
                name: "salt".to_string(),
                value: 1,
            },
        ];
        let csv = ReportingService::export_to_csv(&["name", "value"], &rows).unwrap();
        assert_eq!(csv, "name,value\nflour,25\nsalt,1\n");
    }
}
