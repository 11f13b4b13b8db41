//! HTTP handlers for recipe endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::recipe::{
    BudgetInclusionInput, Recipe, RecipeInput, RecipeSaveResult, RecipeService, RecipeWithLines,
};
use crate::AppState;

/// List all recipes with their ingredient lines, newest first
pub async fn list_recipes(State(state): State<AppState>) -> AppResult<Json<Vec<RecipeWithLines>>> {
    let service = RecipeService::new(state.db);
    let recipes = service.list().await?;
    Ok(Json(recipes))
}

/// Get a single recipe with its lines
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> AppResult<Json<RecipeWithLines>> {
    let service = RecipeService::new(state.db);
    let recipe = service.get(recipe_id).await?;
    Ok(Json(recipe))
}

/// Create a recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(input): Json<RecipeInput>,
) -> AppResult<Json<RecipeSaveResult>> {
    let service = RecipeService::new(state.db);
    let result = service.create(input).await?;
    Ok(Json(result))
}

/// Replace a recipe, including its ingredient-association set
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
    Json(input): Json<RecipeInput>,
) -> AppResult<Json<RecipeSaveResult>> {
    let service = RecipeService::new(state.db);
    let result = service.update(recipe_id, input).await?;
    Ok(Json(result))
}

/// Toggle the budget-inclusion flag
pub async fn set_budget_inclusion(
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
    Json(input): Json<BudgetInclusionInput>,
) -> AppResult<Json<Recipe>> {
    let service = RecipeService::new(state.db);
    let recipe = service
        .set_budget_inclusion(recipe_id, input.include_in_budget)
        .await?;
    Ok(Json(recipe))
}

/// Delete a recipe and its ingredient associations
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = RecipeService::new(state.db);
    service.delete(recipe_id).await?;
    Ok(Json(()))
}
