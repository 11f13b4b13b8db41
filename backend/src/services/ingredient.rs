//! Ingredient service for purchasable items and their package pricing

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;
use validator::Validate;

use shared::costing::ingredient_unit_cost;
use shared::types::IngredientResolution;
use shared::validation::validate_ingredient;

use crate::error::{AppError, AppResult};

/// Default category for ingredients created as a recipe side effect
pub const DEFAULT_CATEGORY: &str = "Other";

/// Ingredient service for managing purchasable items
#[derive(Clone)]
pub struct IngredientService {
    db: PgPool,
}

/// Ingredient record
///
/// `unit_cost` is always `package_price / package_qty`, recomputed on
/// every write.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub package_price: Decimal,
    pub package_qty: Decimal,
    pub unit_cost: Decimal,
    pub stock_qty: Decimal,
    pub low_stock_threshold: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing an ingredient
#[derive(Debug, Deserialize, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub category: Option<String>,
    pub package_price: Decimal,
    pub package_qty: Decimal,
    pub stock_qty: Option<Decimal>,
    pub low_stock_threshold: Option<Decimal>,
}

const INGREDIENT_COLUMNS: &str = "id, name, category, package_price, package_qty, unit_cost, \
                                  stock_qty, low_stock_threshold, created_at, updated_at";

impl IngredientService {
    /// Create a new IngredientService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all ingredients, newest first
    pub async fn list(&self) -> AppResult<Vec<Ingredient>> {
        let ingredients = sqlx::query_as::<_, Ingredient>(&format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(ingredients)
    }

    /// Get a single ingredient
    pub async fn get(&self, ingredient_id: Uuid) -> AppResult<Ingredient> {
        let ingredient = sqlx::query_as::<_, Ingredient>(&format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE id = $1"
        ))
        .bind(ingredient_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        Ok(ingredient)
    }

    /// Create an ingredient, deriving its unit cost from package pricing
    pub async fn create(&self, input: IngredientInput) -> AppResult<Ingredient> {
        Self::validate_input(&input)?;

        let unit_cost = ingredient_unit_cost(input.package_price, input.package_qty);
        let category = input.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let stock_qty = input.stock_qty.unwrap_or(Decimal::ZERO);
        let low_stock_threshold = input.low_stock_threshold.unwrap_or(Decimal::ZERO);

        let ingredient = sqlx::query_as::<_, Ingredient>(&format!(
            r#"
            INSERT INTO ingredients (name, category, package_price, package_qty, unit_cost,
                                     stock_qty, low_stock_threshold)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {INGREDIENT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&category)
        .bind(input.package_price)
        .bind(input.package_qty)
        .bind(unit_cost)
        .bind(stock_qty)
        .bind(low_stock_threshold)
        .fetch_one(&self.db)
        .await?;

        Ok(ingredient)
    }

    /// Replace an ingredient, recomputing its unit cost
    pub async fn update(&self, ingredient_id: Uuid, input: IngredientInput) -> AppResult<Ingredient> {
        Self::validate_input(&input)?;

        let unit_cost = ingredient_unit_cost(input.package_price, input.package_qty);
        let category = input.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let stock_qty = input.stock_qty.unwrap_or(Decimal::ZERO);
        let low_stock_threshold = input.low_stock_threshold.unwrap_or(Decimal::ZERO);

        let ingredient = sqlx::query_as::<_, Ingredient>(&format!(
            r#"
            UPDATE ingredients
            SET name = $1, category = $2, package_price = $3, package_qty = $4,
                unit_cost = $5, stock_qty = $6, low_stock_threshold = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING {INGREDIENT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&category)
        .bind(input.package_price)
        .bind(input.package_qty)
        .bind(unit_cost)
        .bind(stock_qty)
        .bind(low_stock_threshold)
        .bind(ingredient_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        Ok(ingredient)
    }

    /// Delete an ingredient
    pub async fn delete(&self, ingredient_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(ingredient_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ingredient".to_string()));
        }

        Ok(())
    }

    /// Resolve an ingredient name to an id, creating a zero-stock record
    /// when no ingredient with that exact name exists.
    ///
    /// The lookup is case-sensitive. Runs on an explicit connection so it
    /// can participate in the caller's transaction.
    pub async fn resolve_or_create(
        conn: &mut PgConnection,
        name: &str,
    ) -> AppResult<IngredientResolution> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM ingredients WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

        if let Some(id) = existing {
            return Ok(IngredientResolution::Found(id));
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO ingredients (name, category, package_price, package_qty, unit_cost,
                                     stock_qty, low_stock_threshold)
            VALUES ($1, $2, 0, 1, 0, 0, 0)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(DEFAULT_CATEGORY)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!("Created placeholder ingredient '{}' ({})", name, id);

        Ok(IngredientResolution::Created(id))
    }

    fn validate_input(input: &IngredientInput) -> AppResult<()> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        validate_ingredient(&input.name, input.package_qty).map_err(|msg| {
            AppError::Validation {
                field: "package_qty".to_string(),
                message: msg.to_string(),
            }
        })?;
        Ok(())
    }
}
