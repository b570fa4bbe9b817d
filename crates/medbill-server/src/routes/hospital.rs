//! Hospital Routes
//!
//! HTTP handlers that delegate to HospitalService.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::models::{CreateHospitalRequest, HospitalResponse, UpdateHospitalRequest};
use crate::AppState;

use super::error_response;

/// List all Hospitals
#[utoipa::path(
    get,
    path = "/api/hospitals",
    responses(
        (status = 200, description = "List of all Hospitals", body = Vec<HospitalResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Hospital"
)]
pub async fn list_hospitals(
    State(state): State<AppState>,
) -> Result<Json<Vec<HospitalResponse>>, (StatusCode, String)> {
    let hospitals = state
        .hospital_service
        .list_all()
        .await
        .map_err(error_response)?;

    Ok(Json(hospitals.into_iter().map(Into::into).collect()))
}

/// Create new Hospital
#[utoipa::path(
    post,
    path = "/api/hospitals",
    request_body = CreateHospitalRequest,
    responses(
        (status = 201, description = "Hospital created", body = HospitalResponse),
        (status = 400, description = "Invalid fields"),
        (status = 409, description = "Code already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Hospital"
)]
pub async fn create_hospital(
    State(state): State<AppState>,
    Json(payload): Json<CreateHospitalRequest>,
) -> Result<(StatusCode, Json<HospitalResponse>), (StatusCode, String)> {
    let hospital = state
        .hospital_service
        .create(payload.name, payload.code)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(hospital.into())))
}

/// Get Hospital by ID
#[utoipa::path(
    get,
    path = "/api/hospitals/{id}",
    params(("id" = Uuid, Path, description = "Hospital ID")),
    responses(
        (status = 200, description = "Hospital found", body = HospitalResponse),
        (status = 404, description = "Hospital not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Hospital"
)]
pub async fn get_hospital(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HospitalResponse>, (StatusCode, String)> {
    let hospital = state
        .hospital_service
        .get_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or((StatusCode::NOT_FOUND, "Hospital not found".to_string()))?;

    Ok(Json(hospital.into()))
}

/// Update Hospital
#[utoipa::path(
    patch,
    path = "/api/hospitals/{id}",
    params(("id" = Uuid, Path, description = "Hospital ID")),
    request_body = UpdateHospitalRequest,
    responses(
        (status = 200, description = "Hospital updated", body = HospitalResponse),
        (status = 404, description = "Hospital not found"),
        (status = 409, description = "Code already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Hospital"
)]
pub async fn update_hospital(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHospitalRequest>,
) -> Result<Json<HospitalResponse>, (StatusCode, String)> {
    let hospital = state
        .hospital_service
        .update(id, payload.name, payload.code)
        .await
        .map_err(error_response)?;

    Ok(Json(hospital.into()))
}

/// Delete Hospital
#[utoipa::path(
    delete,
    path = "/api/hospitals/{id}",
    params(("id" = Uuid, Path, description = "Hospital ID")),
    responses(
        (status = 200, description = "Hospital deleted with its productions and transfers"),
        (status = 404, description = "Hospital not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Hospital"
)]
pub async fn delete_hospital(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let deleted = state
        .hospital_service
        .delete(id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Hospital not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Hospital deleted"
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/hospitals", get(list_hospitals).post(create_hospital))
        .route(
            "/api/hospitals/:id",
            get(get_hospital)
                .patch(update_hospital)
                .put(update_hospital)
                .delete(delete_hospital),
        )
}
