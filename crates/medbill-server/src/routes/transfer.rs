//! Transfer Routes
//!
//! HTTP handlers that delegate to TransferService.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::models::{
    CreateTransferRequest, LedgerListQuery, TransferResponse, UpdateTransferRequest,
};
use crate::AppState;

use super::error_response;

/// List Transfers
///
/// GET /api/transfers?doctor=...&hospital=...&start_date=...&end_date=...
#[utoipa::path(
    get,
    path = "/api/transfers",
    params(LedgerListQuery),
    responses(
        (status = 200, description = "Matching Transfers, newest first", body = Vec<TransferResponse>),
        (status = 400, description = "Malformed filter"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Transfer"
)]
pub async fn list_transfers(
    State(state): State<AppState>,
    Query(query): Query<LedgerListQuery>,
) -> Result<Json<Vec<TransferResponse>>, (StatusCode, String)> {
    let filter = query.to_filter().map_err(error_response)?;

    let transfers = state
        .transfer_service
        .list(&filter)
        .await
        .map_err(error_response)?;

    Ok(Json(transfers.into_iter().map(Into::into).collect()))
}

/// Create new Transfer
#[utoipa::path(
    post,
    path = "/api/transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 201, description = "Transfer created", body = TransferResponse),
        (status = 400, description = "Invalid amount or unknown doctor/hospital"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransferRequest>,
) -> Result<(StatusCode, Json<TransferResponse>), (StatusCode, String)> {
    let transfer = state
        .transfer_service
        .create(
            payload.doctor,
            payload.hospital,
            payload.amount,
            payload.transfer_date,
        )
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(transfer.into())))
}

/// Get Transfer by ID
#[utoipa::path(
    get,
    path = "/api/transfers/{id}",
    params(("id" = Uuid, Path, description = "Transfer ID")),
    responses(
        (status = 200, description = "Transfer found", body = TransferResponse),
        (status = 404, description = "Transfer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Transfer"
)]
pub async fn get_transfer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransferResponse>, (StatusCode, String)> {
    let transfer = state
        .transfer_service
        .get_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or((StatusCode::NOT_FOUND, "Transfer not found".to_string()))?;

    Ok(Json(transfer.into()))
}

/// Update Transfer
#[utoipa::path(
    patch,
    path = "/api/transfers/{id}",
    params(("id" = Uuid, Path, description = "Transfer ID")),
    request_body = UpdateTransferRequest,
    responses(
        (status = 200, description = "Transfer updated", body = TransferResponse),
        (status = 400, description = "Invalid amount or unknown doctor/hospital"),
        (status = 404, description = "Transfer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Transfer"
)]
pub async fn update_transfer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransferRequest>,
) -> Result<Json<TransferResponse>, (StatusCode, String)> {
    let transfer = state
        .transfer_service
        .update(
            id,
            payload.doctor,
            payload.hospital,
            payload.amount,
            payload.transfer_date,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(transfer.into()))
}

/// Delete Transfer
#[utoipa::path(
    delete,
    path = "/api/transfers/{id}",
    params(("id" = Uuid, Path, description = "Transfer ID")),
    responses(
        (status = 200, description = "Transfer deleted"),
        (status = 404, description = "Transfer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Transfer"
)]
pub async fn delete_transfer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let deleted = state
        .transfer_service
        .delete(id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Transfer not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Transfer deleted"
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/transfers",
            get(list_transfers).post(create_transfer),
        )
        .route(
            "/api/transfers/:id",
            get(get_transfer)
                .patch(update_transfer)
                .put(update_transfer)
                .delete(delete_transfer),
        )
}
