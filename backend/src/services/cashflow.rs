//! Cashflow service for point-of-sale transactions and cash entries
//!
//! Older deployments predate the optional cost/profit columns. Reads and
//! writes probe the live schema and fall back to the reduced column set,
//! null-filling the missing fields.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::types::EntryType;
use shared::validation::validate_amount;

use crate::error::{AppError, AppResult};

/// Cashflow service
#[derive(Clone)]
pub struct CashflowService {
    db: PgPool,
}

/// Cashflow entry record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CashflowEntry {
    pub id: Uuid,
    pub entry_type: String,
    pub amount: Decimal,
    pub cost: Option<Decimal>,
    pub profit: Option<Decimal>,
    pub description: String,
    pub entry_date: NaiveDate,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or replacing a cashflow entry
#[derive(Debug, Deserialize)]
pub struct CashflowInput {
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub cost: Option<Decimal>,
    pub profit: Option<Decimal>,
    pub description: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub category: Option<String>,
}

const FULL_COLUMNS: &str =
    "id, entry_type, amount, cost, profit, description, entry_date, category, created_at";

// Reduced set for schemas missing the optional cost/profit columns
const REDUCED_COLUMNS: &str = "id, entry_type, amount, NULL::NUMERIC AS cost, \
                               NULL::NUMERIC AS profit, description, entry_date, category, created_at";

// Scoped to the live schema: another schema holding a table of the same
// name must not flip the shim into degraded mode.
const SCHEMA_PROBE: &str = "SELECT COUNT(*) FROM information_schema.columns \
                            WHERE table_schema = current_schema() \
                            AND table_name = 'cashflow_entries' \
                            AND column_name IN ('cost', 'profit')";

impl CashflowService {
    /// Create a new CashflowService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Whether the live schema carries the optional cost/profit columns
    async fn has_extended_columns(&self) -> AppResult<bool> {
        let count = sqlx::query_scalar::<_, i64>(SCHEMA_PROBE)
            .fetch_one(&self.db)
            .await?;

        Ok(count == 2)
    }

    /// List all entries, newest first
    pub async fn list(&self) -> AppResult<Vec<CashflowEntry>> {
        let columns = if self.has_extended_columns().await? {
            FULL_COLUMNS
        } else {
            REDUCED_COLUMNS
        };

        let entries = sqlx::query_as::<_, CashflowEntry>(&format!(
            "SELECT {columns} FROM cashflow_entries ORDER BY entry_date DESC, created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// Get a single entry
    pub async fn get(&self, entry_id: Uuid) -> AppResult<CashflowEntry> {
        let columns = if self.has_extended_columns().await? {
            FULL_COLUMNS
        } else {
            REDUCED_COLUMNS
        };

        let entry = sqlx::query_as::<_, CashflowEntry>(&format!(
            "SELECT {columns} FROM cashflow_entries WHERE id = $1"
        ))
        .bind(entry_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Cashflow entry".to_string()))?;

        Ok(entry)
    }

    /// Create an entry
    pub async fn create(&self, input: CashflowInput) -> AppResult<CashflowEntry> {
        Self::validate_input(&input)?;

        let description = input.description.unwrap_or_default();
        let entry_date = input.entry_date.unwrap_or_else(|| Utc::now().date_naive());
        let category = input.category.unwrap_or_else(|| "general".to_string());

        let entry = if self.has_extended_columns().await? {
            sqlx::query_as::<_, CashflowEntry>(&format!(
                r#"
                INSERT INTO cashflow_entries (entry_type, amount, cost, profit, description,
                                              entry_date, category)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {FULL_COLUMNS}
                "#
            ))
            .bind(input.entry_type.as_str())
            .bind(input.amount)
            .bind(input.cost)
            .bind(input.profit)
            .bind(&description)
            .bind(entry_date)
            .bind(&category)
            .fetch_one(&self.db)
            .await?
        } else {
            sqlx::query_as::<_, CashflowEntry>(&format!(
                r#"
                INSERT INTO cashflow_entries (entry_type, amount, description, entry_date, category)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {REDUCED_COLUMNS}
                "#
            ))
            .bind(input.entry_type.as_str())
            .bind(input.amount)
            .bind(&description)
            .bind(entry_date)
            .bind(&category)
            .fetch_one(&self.db)
            .await?
        };

        Ok(entry)
    }

    /// Replace an entry
    pub async fn update(&self, entry_id: Uuid, input: CashflowInput) -> AppResult<CashflowEntry> {
        Self::validate_input(&input)?;

        let description = input.description.unwrap_or_default();
        let entry_date = input.entry_date.unwrap_or_else(|| Utc::now().date_naive());
        let category = input.category.unwrap_or_else(|| "general".to_string());

        let entry = if self.has_extended_columns().await? {
            sqlx::query_as::<_, CashflowEntry>(&format!(
                r#"
                UPDATE cashflow_entries
                SET entry_type = $1, amount = $2, cost = $3, profit = $4, description = $5,
                    entry_date = $6, category = $7
                WHERE id = $8
                RETURNING {FULL_COLUMNS}
                "#
            ))
            .bind(input.entry_type.as_str())
            .bind(input.amount)
            .bind(input.cost)
            .bind(input.profit)
            .bind(&description)
            .bind(entry_date)
            .bind(&category)
            .bind(entry_id)
            .fetch_optional(&self.db)
            .await?
        } else {
            sqlx::query_as::<_, CashflowEntry>(&format!(
                r#"
                UPDATE cashflow_entries
                SET entry_type = $1, amount = $2, description = $3, entry_date = $4, category = $5
                WHERE id = $6
                RETURNING {REDUCED_COLUMNS}
                "#
            ))
            .bind(input.entry_type.as_str())
            .bind(input.amount)
            .bind(&description)
            .bind(entry_date)
            .bind(&category)
            .bind(entry_id)
            .fetch_optional(&self.db)
            .await?
        };

        entry.ok_or_else(|| AppError::NotFound("Cashflow entry".to_string()))
    }

    /// Delete an entry
    pub async fn delete(&self, entry_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM cashflow_entries WHERE id = $1")
            .bind(entry_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cashflow entry".to_string()));
        }

        Ok(())
    }

    fn validate_input(input: &CashflowInput) -> AppResult<()> {
        validate_amount(input.amount).map_err(|msg| AppError::Validation {
            field: "amount".to_string(),
            message: msg.to_string(),
        })
    }
}
