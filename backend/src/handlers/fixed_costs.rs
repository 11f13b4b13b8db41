//! HTTP handlers for fixed cost endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::fixed_cost::{FixedCost, FixedCostInput, FixedCostService};
use crate::AppState;

/// List all fixed costs, newest first
pub async fn list_fixed_costs(State(state): State<AppState>) -> AppResult<Json<Vec<FixedCost>>> {
    let service = FixedCostService::new(state.db);
    let costs = service.list().await?;
    Ok(Json(costs))
}

/// Get a single fixed cost
pub async fn get_fixed_cost(
    State(state): State<AppState>,
    Path(cost_id): Path<Uuid>,
) -> AppResult<Json<FixedCost>> {
    let service = FixedCostService::new(state.db);
    let cost = service.get(cost_id).await?;
    Ok(Json(cost))
}

/// Create a fixed cost
pub async fn create_fixed_cost(
    State(state): State<AppState>,
    Json(input): Json<FixedCostInput>,
) -> AppResult<Json<FixedCost>> {
    let service = FixedCostService::new(state.db);
    let cost = service.create(input).await?;
    Ok(Json(cost))
}

/// Replace a fixed cost
pub async fn update_fixed_cost(
    State(state): State<AppState>,
    Path(cost_id): Path<Uuid>,
    Json(input): Json<FixedCostInput>,
) -> AppResult<Json<FixedCost>> {
    let service = FixedCostService::new(state.db);
    let cost = service.update(cost_id, input).await?;
    Ok(Json(cost))
}

/// Delete a fixed cost
pub async fn delete_fixed_cost(
    State(state): State<AppState>,
    Path(cost_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = FixedCostService::new(state.db);
    service.delete(cost_id).await?;
    Ok(Json(()))
}
