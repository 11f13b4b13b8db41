//! HTTP handlers for budget endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::budget::{Budget, BudgetInput, BudgetService};
use crate::AppState;

/// List all budgets, newest first
pub async fn list_budgets(State(state): State<AppState>) -> AppResult<Json<Vec<Budget>>> {
    let service = BudgetService::new(state.db);
    let budgets = service.list().await?;
    Ok(Json(budgets))
}

/// Get a single budget
pub async fn get_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<Uuid>,
) -> AppResult<Json<Budget>> {
    let service = BudgetService::new(state.db);
    let budget = service.get(budget_id).await?;
    Ok(Json(budget))
}

/// Create a budget
pub async fn create_budget(
    State(state): State<AppState>,
    Json(input): Json<BudgetInput>,
) -> AppResult<Json<Budget>> {
    let service = BudgetService::new(state.db);
    let budget = service.create(input).await?;
    Ok(Json(budget))
}

/// Replace a budget
pub async fn update_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<Uuid>,
    Json(input): Json<BudgetInput>,
) -> AppResult<Json<Budget>> {
    let service = BudgetService::new(state.db);
    let budget = service.update(budget_id, input).await?;
    Ok(Json(budget))
}

/// Delete a budget
pub async fn delete_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = BudgetService::new(state.db);
    service.delete(budget_id).await?;
    Ok(Json(()))
}
