//! HTTP handlers for reporting endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::reporting::{DashboardMetrics, RecipeProfitability, ReportingService};
use crate::AppState;

#[derive(Deserialize)]
pub struct ProfitabilityQuery {
    /// Intended sale price per unit
    pub price: Decimal,
}

/// Get dashboard metrics
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardMetrics>> {
    let service = ReportingService::new(state.db);
    let metrics = service.get_dashboard_metrics().await?;
    Ok(Json(metrics))
}

/// Get the profitability report for a recipe at a given sale price
pub async fn get_recipe_profitability(
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
    Query(query): Query<ProfitabilityQuery>,
) -> AppResult<Json<RecipeProfitability>> {
    let service = ReportingService::new(state.db);
    let report = service
        .get_recipe_profitability(recipe_id, query.price)
        .await?;
    Ok(Json(report))
}
