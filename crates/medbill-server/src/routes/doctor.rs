//! Doctor Routes - Registry and financial summary
//!
//! HTTP handlers that delegate to DoctorService and SummaryService.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::models::{
    CreateDoctorRequest, DoctorResponse, FinancialSummaryResponse, SummaryParams,
    UpdateDoctorRequest,
};
use crate::AppState;

use super::error_response;

/// List all Doctors
#[utoipa::path(
    get,
    path = "/api/doctors",
    responses(
        (status = 200, description = "List of all Doctors", body = Vec<DoctorResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Doctor"
)]
pub async fn list_doctors(
    State(state): State<AppState>,
) -> Result<Json<Vec<DoctorResponse>>, (StatusCode, String)> {
    let doctors = state
        .doctor_service
        .list_all()
        .await
        .map_err(error_response)?;

    Ok(Json(doctors.into_iter().map(Into::into).collect()))
}

/// Create new Doctor
#[utoipa::path(
    post,
    path = "/api/doctors",
    request_body = CreateDoctorRequest,
    responses(
        (status = 201, description = "Doctor created", body = DoctorResponse),
        (status = 400, description = "Invalid fields"),
        (status = 409, description = "CRM already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Doctor"
)]
pub async fn create_doctor(
    State(state): State<AppState>,
    Json(payload): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<DoctorResponse>), (StatusCode, String)> {
    let doctor = state
        .doctor_service
        .create(payload.name, payload.crm, payload.specialty)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(doctor.into())))
}

/// Get Doctor by ID
#[utoipa::path(
    get,
    path = "/api/doctors/{id}",
    params(("id" = Uuid, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Doctor found", body = DoctorResponse),
        (status = 404, description = "Doctor not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Doctor"
)]
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DoctorResponse>, (StatusCode, String)> {
    let doctor = state
        .doctor_service
        .get_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or((StatusCode::NOT_FOUND, "Doctor not found".to_string()))?;

    Ok(Json(doctor.into()))
}

/// Update Doctor
#[utoipa::path(
    patch,
    path = "/api/doctors/{id}",
    params(("id" = Uuid, Path, description = "Doctor ID")),
    request_body = UpdateDoctorRequest,
    responses(
        (status = 200, description = "Doctor updated", body = DoctorResponse),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Doctor not found"),
        (status = 409, description = "CRM already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Doctor"
)]
pub async fn update_doctor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDoctorRequest>,
) -> Result<Json<DoctorResponse>, (StatusCode, String)> {
    let doctor = state
        .doctor_service
        .update(id, payload.name, payload.crm, payload.specialty)
        .await
        .map_err(error_response)?;

    Ok(Json(doctor.into()))
}

/// Delete Doctor
#[utoipa::path(
    delete,
    path = "/api/doctors/{id}",
    params(("id" = Uuid, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Doctor deleted with its productions and transfers"),
        (status = 404, description = "Doctor not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Doctor"
)]
pub async fn delete_doctor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let deleted = state
        .doctor_service
        .delete(id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Doctor not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Doctor deleted"
    })))
}

/// Financial summary of a Doctor
///
/// GET /api/doctors/{id}/financial-summary?start_date=2024-01-01&end_date=2024-01-31
#[utoipa::path(
    get,
    path = "/api/doctors/{id}/financial-summary",
    params(
        ("id" = Uuid, Path, description = "Doctor ID"),
        SummaryParams
    ),
    responses(
        (status = 200, description = "Totals produced, transferred and balance", body = FinancialSummaryResponse),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Doctor not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Summary"
)]
pub async fn get_financial_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<FinancialSummaryResponse>, (StatusCode, String)> {
    let period = params.to_range().map_err(error_response)?;

    let summary = state
        .summary_service
        .for_doctor(id, period)
        .await
        .map_err(error_response)?;

    Ok(Json(summary.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/doctors", get(list_doctors).post(create_doctor))
        .route(
            "/api/doctors/:id",
            get(get_doctor)
                .patch(update_doctor)
                .put(update_doctor)
                .delete(delete_doctor),
        )
        .route("/api/doctors/:id/financial-summary", get(get_financial_summary))
}
