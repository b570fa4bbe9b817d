//! Hospital DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use medbill::Hospital;

/// Create Hospital request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHospitalRequest {
    pub name: String,
    pub code: String,
}

/// Update Hospital request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateHospitalRequest {
    pub name: Option<String>,
    pub code: Option<String>,
}

/// Hospital response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HospitalResponse {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl From<Hospital> for HospitalResponse {
    fn from(hospital: Hospital) -> Self {
        Self {
            id: hospital.id,
            name: hospital.name,
            code: hospital.code,
            created_at: hospital.created_at,
        }
    }
}
