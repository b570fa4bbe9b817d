//! Production Routes
//!
//! HTTP handlers that delegate to ProductionService.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::models::{
    CreateProductionRequest, LedgerListQuery, ProductionResponse, UpdateProductionRequest,
};
use crate::AppState;

use super::error_response;

/// List Productions
///
/// GET /api/productions?doctor=...&hospital=...&start_date=...&end_date=...
#[utoipa::path(
    get,
    path = "/api/productions",
    params(LedgerListQuery),
    responses(
        (status = 200, description = "Matching Productions, newest first", body = Vec<ProductionResponse>),
        (status = 400, description = "Malformed filter"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Production"
)]
pub async fn list_productions(
    State(state): State<AppState>,
    Query(query): Query<LedgerListQuery>,
) -> Result<Json<Vec<ProductionResponse>>, (StatusCode, String)> {
    let filter = query.to_filter().map_err(error_response)?;

    let productions = state
        .production_service
        .list(&filter)
        .await
        .map_err(error_response)?;

    Ok(Json(productions.into_iter().map(Into::into).collect()))
}

/// Create new Production
#[utoipa::path(
    post,
    path = "/api/productions",
    request_body = CreateProductionRequest,
    responses(
        (status = 201, description = "Production created", body = ProductionResponse),
        (status = 400, description = "Invalid amount or unknown doctor/hospital"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Production"
)]
pub async fn create_production(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductionRequest>,
) -> Result<(StatusCode, Json<ProductionResponse>), (StatusCode, String)> {
    let production = state
        .production_service
        .create(
            payload.doctor,
            payload.hospital,
            payload.amount,
            payload.production_date,
        )
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(production.into())))
}

/// Get Production by ID
#[utoipa::path(
    get,
    path = "/api/productions/{id}",
    params(("id" = Uuid, Path, description = "Production ID")),
    responses(
        (status = 200, description = "Production found", body = ProductionResponse),
        (status = 404, description = "Production not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Production"
)]
pub async fn get_production(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductionResponse>, (StatusCode, String)> {
    let production = state
        .production_service
        .get_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or((StatusCode::NOT_FOUND, "Production not found".to_string()))?;

    Ok(Json(production.into()))
}

/// Update Production
#[utoipa::path(
    patch,
    path = "/api/productions/{id}",
    params(("id" = Uuid, Path, description = "Production ID")),
    request_body = UpdateProductionRequest,
    responses(
        (status = 200, description = "Production updated", body = ProductionResponse),
        (status = 400, description = "Invalid amount or unknown doctor/hospital"),
        (status = 404, description = "Production not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Production"
)]
pub async fn update_production(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductionRequest>,
) -> Result<Json<ProductionResponse>, (StatusCode, String)> {
    let production = state
        .production_service
        .update(
            id,
            payload.doctor,
            payload.hospital,
            payload.amount,
            payload.production_date,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(production.into()))
}

/// Delete Production
#[utoipa::path(
    delete,
    path = "/api/productions/{id}",
    params(("id" = Uuid, Path, description = "Production ID")),
    responses(
        (status = 200, description = "Production deleted"),
        (status = 404, description = "Production not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Production"
)]
pub async fn delete_production(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let deleted = state
        .production_service
        .delete(id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Production not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Production deleted"
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/productions",
            get(list_productions).post(create_production),
        )
        .route(
            "/api/productions/:id",
            get(get_production)
                .patch(update_production)
                .put(update_production)
                .delete(delete_production),
        )
}
