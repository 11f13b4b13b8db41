//! Fixed cost service for recurring expenses

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use shared::types::{AllocationMethod, CostType};

use crate::error::{AppError, AppResult};

/// Fixed cost service
#[derive(Clone)]
pub struct FixedCostService {
    db: PgPool,
}

/// Fixed cost record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FixedCost {
    pub id: Uuid,
    pub name: String,
    pub cost_type: String,
    pub value: Decimal,
    pub allocation_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FixedCost {
    /// Parsed allocation method; stored values always come from
    /// [`AllocationMethod::as_str`], so this only fails on hand-edited rows.
    pub fn allocation(&self) -> Option<AllocationMethod> {
        AllocationMethod::parse(&self.allocation_method)
    }
}

/// Input for creating or replacing a fixed cost
#[derive(Debug, Deserialize, Validate)]
pub struct FixedCostInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub cost_type: CostType,
    pub value: Decimal,
    pub allocation_method: AllocationMethod,
}

const FIXED_COST_COLUMNS: &str =
    "id, name, cost_type, value, allocation_method, created_at, updated_at";

impl FixedCostService {
    /// Create a new FixedCostService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all fixed costs, newest first
    pub async fn list(&self) -> AppResult<Vec<FixedCost>> {
        let costs = sqlx::query_as::<_, FixedCost>(&format!(
            "SELECT {FIXED_COST_COLUMNS} FROM fixed_costs ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(costs)
    }

    /// Get a single fixed cost
    pub async fn get(&self, cost_id: Uuid) -> AppResult<FixedCost> {
        let cost = sqlx::query_as::<_, FixedCost>(&format!(
            "SELECT {FIXED_COST_COLUMNS} FROM fixed_costs WHERE id = $1"
        ))
        .bind(cost_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Fixed cost".to_string()))?;

        Ok(cost)
    }

    /// Create a fixed cost
    pub async fn create(&self, input: FixedCostInput) -> AppResult<FixedCost> {
        Self::validate_input(&input)?;

        let cost = sqlx::query_as::<_, FixedCost>(&format!(
            r#"
            INSERT INTO fixed_costs (name, cost_type, value, allocation_method)
            VALUES ($1, $2, $3, $4)
            RETURNING {FIXED_COST_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(input.cost_type.as_str())
        .bind(input.value)
        .bind(input.allocation_method.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(cost)
    }

    /// Replace a fixed cost
    pub async fn update(&self, cost_id: Uuid, input: FixedCostInput) -> AppResult<FixedCost> {
        Self::validate_input(&input)?;

        let cost = sqlx::query_as::<_, FixedCost>(&format!(
            r#"
            UPDATE fixed_costs
            SET name = $1, cost_type = $2, value = $3, allocation_method = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {FIXED_COST_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(input.cost_type.as_str())
        .bind(input.value)
        .bind(input.allocation_method.as_str())
        .bind(cost_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Fixed cost".to_string()))?;

        Ok(cost)
    }

    /// Delete a fixed cost
    pub async fn delete(&self, cost_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM fixed_costs WHERE id = $1")
            .bind(cost_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fixed cost".to_string()));
        }

        Ok(())
    }

    fn validate_input(input: &FixedCostInput) -> AppResult<()> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        if input.value < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "value".to_string(),
                message: "Value cannot be negative".to_string(),
            });
        }
        Ok(())
    }
}
