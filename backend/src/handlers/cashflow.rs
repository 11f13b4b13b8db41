//! HTTP handlers for cashflow endpoints

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::cashflow::{CashflowEntry, CashflowInput, CashflowService};
use crate::services::reporting::ReportingService;
use crate::AppState;

/// List all cashflow entries, newest first
pub async fn list_cashflow(State(state): State<AppState>) -> AppResult<Json<Vec<CashflowEntry>>> {
    let service = CashflowService::new(state.db);
    let entries = service.list().await?;
    Ok(Json(entries))
}

/// Get a single cashflow entry
pub async fn get_cashflow_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<CashflowEntry>> {
    let service = CashflowService::new(state.db);
    let entry = service.get(entry_id).await?;
    Ok(Json(entry))
}

/// Create a cashflow entry
pub async fn create_cashflow_entry(
    State(state): State<AppState>,
    Json(input): Json<CashflowInput>,
) -> AppResult<Json<CashflowEntry>> {
    let service = CashflowService::new(state.db);
    let entry = service.create(input).await?;
    Ok(Json(entry))
}

/// Replace a cashflow entry
pub async fn update_cashflow_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    Json(input): Json<CashflowInput>,
) -> AppResult<Json<CashflowEntry>> {
    let service = CashflowService::new(state.db);
    let entry = service.update(entry_id, input).await?;
    Ok(Json(entry))
}

/// Delete a cashflow entry
pub async fn delete_cashflow_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CashflowService::new(state.db);
    service.delete(entry_id).await?;
    Ok(Json(()))
}

// Column order matches the CashflowEntry field order serialized per row
const CASHFLOW_CSV_HEADERS: &[&str] = &[
    "id",
    "entry_type",
    "amount",
    "cost",
    "profit",
    "description",
    "entry_date",
    "category",
    "created_at",
];

/// Export all cashflow entries as CSV
pub async fn export_cashflow(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = CashflowService::new(state.db);
    let entries = service.list().await?;
    let csv_data = ReportingService::export_to_csv(CASHFLOW_CSV_HEADERS, &entries)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"cashflow.csv\"",
            ),
        ],
        csv_data,
    ))
}
