//! Budget service for planned spend per period

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Budget service
#[derive(Clone)]
pub struct BudgetService {
    db: PgPool,
}

/// Budget record: planned amount and actual spend for a period
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Budget {
    pub id: Uuid,
    pub period: String,
    pub amount: Decimal,
    pub spent: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a budget
#[derive(Debug, Deserialize, Validate)]
pub struct BudgetInput {
    #[validate(length(min = 1, message = "period is required"))]
    pub period: String,
    pub amount: Decimal,
    pub spent: Option<Decimal>,
}

const BUDGET_COLUMNS: &str = "id, period, amount, spent, created_at, updated_at";

impl BudgetService {
    /// Create a new BudgetService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all budgets, newest first
    pub async fn list(&self) -> AppResult<Vec<Budget>> {
        let budgets = sqlx::query_as::<_, Budget>(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budgets ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(budgets)
    }

    /// Get a single budget
    pub async fn get(&self, budget_id: Uuid) -> AppResult<Budget> {
        let budget = sqlx::query_as::<_, Budget>(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budgets WHERE id = $1"
        ))
        .bind(budget_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Budget".to_string()))?;

        Ok(budget)
    }

    /// Create a budget
    pub async fn create(&self, input: BudgetInput) -> AppResult<Budget> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let budget = sqlx::query_as::<_, Budget>(&format!(
            r#"
            INSERT INTO budgets (period, amount, spent)
            VALUES ($1, $2, $3)
            RETURNING {BUDGET_COLUMNS}
            "#
        ))
        .bind(&input.period)
        .bind(input.amount)
        .bind(input.spent.unwrap_or(Decimal::ZERO))
        .fetch_one(&self.db)
        .await?;

        Ok(budget)
    }

    /// Replace a budget
    pub async fn update(&self, budget_id: Uuid, input: BudgetInput) -> AppResult<Budget> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let budget = sqlx::query_as::<_, Budget>(&format!(
            r#"
            UPDATE budgets
            SET period = $1, amount = $2, spent = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING {BUDGET_COLUMNS}
            "#
        ))
        .bind(&input.period)
        .bind(input.amount)
        .bind(input.spent.unwrap_or(Decimal::ZERO))
        .bind(budget_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Budget".to_string()))?;

        Ok(budget)
    }

    /// Delete a budget
    pub async fn delete(&self, budget_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = $1")
            .bind(budget_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Budget".to_string()));
        }

        Ok(())
    }
}
