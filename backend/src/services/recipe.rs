//! Recipe service for bill-of-materials costing
//!
//! A recipe's total cost is recomputed on every write from its resolved
//! ingredient lines. The recipe row and its association rows are always
//! written inside a single transaction, so a recipe is never observable
//! with a partially replaced ingredient set.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use shared::costing::{recipe_total_cost, recipe_unit_cost};
use shared::types::IngredientResolution;
use shared::validation::{validate_recipe, RecipeLineCheck};

use crate::error::{AppError, AppResult};
use crate::services::ingredient::IngredientService;

/// Recipe service
#[derive(Clone)]
pub struct RecipeService {
    db: PgPool,
}

/// Recipe record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub yield_units: Decimal,
    pub prep_time_minutes: i32,
    pub total_cost: Decimal,
    pub unit_cost: Decimal,
    pub include_in_budget: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One ingredient line of a recipe, joined with the ingredient name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeLine {
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub position: i32,
}

/// A recipe together with its ordered ingredient lines
#[derive(Debug, Clone, Serialize)]
pub struct RecipeWithLines {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeLine>,
}

/// Result of saving a recipe, including ingredients created as a side
/// effect of name resolution
#[derive(Debug, Serialize)]
pub struct RecipeSaveResult {
    #[serde(flatten)]
    pub recipe: RecipeWithLines,
    /// Ids of placeholder ingredients created while resolving lines
    pub created_ingredients: Vec<Uuid>,
}

/// Input for creating or replacing a recipe
#[derive(Debug, Deserialize)]
pub struct RecipeInput {
    pub name: String,
    pub yield_units: Decimal,
    pub prep_time_minutes: Option<i32>,
    pub include_in_budget: Option<bool>,
    pub ingredients: Vec<RecipeLineInput>,
}

/// One submitted ingredient line: referenced by id, or by name with
/// create-if-missing fallback
#[derive(Debug, Deserialize)]
pub struct RecipeLineInput {
    pub ingredient_id: Option<Uuid>,
    pub name: Option<String>,
    pub quantity: Decimal,
    pub unit: Option<String>,
}

/// Input for the budget-inclusion toggle
#[derive(Debug, Deserialize)]
pub struct BudgetInclusionInput {
    pub include_in_budget: bool,
}

/// A line after resolution against the ingredient store
struct ResolvedLine {
    ingredient_id: Uuid,
    ingredient_name: String,
    quantity: Decimal,
    unit: String,
    unit_cost: Decimal,
    resolution: IngredientResolution,
}

const RECIPE_COLUMNS: &str = "id, name, yield_units, prep_time_minutes, total_cost, unit_cost, \
                              include_in_budget, created_at, updated_at";

impl RecipeService {
    /// Create a new RecipeService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all recipes with their lines, newest first
    pub async fn list(&self) -> AppResult<Vec<RecipeWithLines>> {
        let recipes = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        // One query for all lines, grouped in memory
        #[derive(FromRow)]
        struct LineRow {
            recipe_id: Uuid,
            ingredient_id: Uuid,
            ingredient_name: String,
            quantity: Decimal,
            unit: String,
            position: i32,
        }

        let lines = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT ri.recipe_id, ri.ingredient_id, i.name AS ingredient_name,
                   ri.quantity, ri.unit, ri.position
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            ORDER BY ri.recipe_id, ri.position
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut by_recipe: std::collections::HashMap<Uuid, Vec<RecipeLine>> =
            std::collections::HashMap::new();
        for line in lines {
            by_recipe.entry(line.recipe_id).or_default().push(RecipeLine {
                ingredient_id: line.ingredient_id,
                ingredient_name: line.ingredient_name,
                quantity: line.quantity,
                unit: line.unit,
                position: line.position,
            });
        }

        Ok(recipes
            .into_iter()
            .map(|recipe| {
                let ingredients = by_recipe.remove(&recipe.id).unwrap_or_default();
                RecipeWithLines { recipe, ingredients }
            })
            .collect())
    }

    /// Get a single recipe with its lines
    pub async fn get(&self, recipe_id: Uuid) -> AppResult<RecipeWithLines> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(recipe_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe".to_string()))?;

        let ingredients = self.fetch_lines(recipe_id).await?;

        Ok(RecipeWithLines { recipe, ingredients })
    }

    /// Create a recipe from validated input
    ///
    /// Lines referencing unknown names create placeholder ingredients as a
    /// side effect; those ids are reported in the result.
    pub async fn create(&self, input: RecipeInput) -> AppResult<RecipeSaveResult> {
        Self::validate_input(&input)?;

        let mut tx = self.db.begin().await?;

        let resolved = Self::resolve_lines(&mut tx, &input.ingredients).await?;
        let total_cost = Self::lines_total_cost(&resolved);
        let unit_cost = recipe_unit_cost(total_cost, input.yield_units);

        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            INSERT INTO recipes (name, yield_units, prep_time_minutes, total_cost, unit_cost,
                                 include_in_budget)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(input.yield_units)
        .bind(input.prep_time_minutes.unwrap_or(0))
        .bind(total_cost)
        .bind(unit_cost)
        .bind(input.include_in_budget.unwrap_or(true))
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_lines(&mut tx, recipe.id, &resolved).await?;

        tx.commit().await?;

        Ok(Self::save_result(recipe, resolved))
    }

    /// Replace a recipe, including its full ingredient-association set
    pub async fn update(&self, recipe_id: Uuid, input: RecipeInput) -> AppResult<RecipeSaveResult> {
        Self::validate_input(&input)?;

        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM recipes WHERE id = $1)",
        )
        .bind(recipe_id)
        .fetch_one(&mut *tx)
        .await?;

        if !exists {
            return Err(AppError::NotFound("Recipe".to_string()));
        }

        let resolved = Self::resolve_lines(&mut tx, &input.ingredients).await?;
        let total_cost = Self::lines_total_cost(&resolved);
        let unit_cost = recipe_unit_cost(total_cost, input.yield_units);

        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            UPDATE recipes
            SET name = $1, yield_units = $2, prep_time_minutes = $3, total_cost = $4,
                unit_cost = $5, include_in_budget = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(input.yield_units)
        .bind(input.prep_time_minutes.unwrap_or(0))
        .bind(total_cost)
        .bind(unit_cost)
        .bind(input.include_in_budget.unwrap_or(true))
        .bind(recipe_id)
        .fetch_one(&mut *tx)
        .await?;

        // Replace the association set wholesale rather than diffing
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        Self::insert_lines(&mut tx, recipe_id, &resolved).await?;

        tx.commit().await?;

        Ok(Self::save_result(recipe, resolved))
    }

    /// Toggle only the budget-inclusion flag
    pub async fn set_budget_inclusion(
        &self,
        recipe_id: Uuid,
        include_in_budget: bool,
    ) -> AppResult<Recipe> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            UPDATE recipes SET include_in_budget = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(include_in_budget)
        .bind(recipe_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe".to_string()))?;

        Ok(recipe)
    }

    /// Delete a recipe and its association rows
    pub async fn delete(&self, recipe_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Recipe".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Resolve submitted lines against the ingredient store
    async fn resolve_lines(
        tx: &mut Transaction<'_, Postgres>,
        lines: &[RecipeLineInput],
    ) -> AppResult<Vec<ResolvedLine>> {
        let mut resolved = Vec::with_capacity(lines.len());

        for line in lines {
            let resolution = match (line.ingredient_id, line.name.as_deref()) {
                (Some(id), _) => {
                    let exists = sqlx::query_scalar::<_, bool>(
                        "SELECT EXISTS(SELECT 1 FROM ingredients WHERE id = $1)",
                    )
                    .bind(id)
                    .fetch_one(&mut **tx)
                    .await?;

                    if !exists {
                        return Err(AppError::NotFound("Ingredient".to_string()));
                    }
                    IngredientResolution::Found(id)
                }
                (None, Some(name)) => {
                    IngredientService::resolve_or_create(&mut **tx, name).await?
                }
                (None, None) => {
                    // Rejected earlier by validate_recipe; defend anyway
                    return Err(AppError::ValidationError(
                        "Each ingredient line needs an id or a name".to_string(),
                    ));
                }
            };

            let (ingredient_name, unit_cost) = sqlx::query_as::<_, (String, Decimal)>(
                "SELECT name, unit_cost FROM ingredients WHERE id = $1",
            )
            .bind(resolution.id())
            .fetch_one(&mut **tx)
            .await?;

            resolved.push(ResolvedLine {
                ingredient_id: resolution.id(),
                ingredient_name,
                quantity: line.quantity,
                unit: line.unit.clone().unwrap_or_else(|| "unit".to_string()),
                unit_cost,
                resolution,
            });
        }

        Ok(resolved)
    }

    async fn insert_lines(
        tx: &mut Transaction<'_, Postgres>,
        recipe_id: Uuid,
        lines: &[ResolvedLine],
    ) -> AppResult<()> {
        for (position, line) in lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity, unit, position)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(recipe_id)
            .bind(line.ingredient_id)
            .bind(line.quantity)
            .bind(&line.unit)
            .bind(position as i32)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    async fn fetch_lines(&self, recipe_id: Uuid) -> AppResult<Vec<RecipeLine>> {
        let lines = sqlx::query_as::<_, RecipeLine>(
            r#"
            SELECT ri.ingredient_id, i.name AS ingredient_name, ri.quantity, ri.unit, ri.position
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY ri.position
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&self.db)
        .await?;

        Ok(lines)
    }

    fn lines_total_cost(lines: &[ResolvedLine]) -> Decimal {
        let pairs: Vec<(Decimal, Decimal)> =
            lines.iter().map(|l| (l.quantity, l.unit_cost)).collect();
        recipe_total_cost(&pairs)
    }

    fn save_result(recipe: Recipe, resolved: Vec<ResolvedLine>) -> RecipeSaveResult {
        let created_ingredients = resolved
            .iter()
            .filter(|l| l.resolution.was_created())
            .map(|l| l.ingredient_id)
            .collect();

        let ingredients = resolved
            .into_iter()
            .enumerate()
            .map(|(position, l)| RecipeLine {
                ingredient_id: l.ingredient_id,
                ingredient_name: l.ingredient_name,
                quantity: l.quantity,
                unit: l.unit,
                position: position as i32,
            })
            .collect();

        RecipeSaveResult {
            recipe: RecipeWithLines { recipe, ingredients },
            created_ingredients,
        }
    }

    fn validate_input(input: &RecipeInput) -> AppResult<()> {
        let checks: Vec<RecipeLineCheck<'_>> = input
            .ingredients
            .iter()
            .map(|line| RecipeLineCheck {
                ingredient_name: line.name.as_deref(),
                has_ingredient_id: line.ingredient_id.is_some(),
                quantity: line.quantity,
            })
            .collect();

        validate_recipe(&input.name, input.yield_units, &checks)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))
    }
}
