//! Doctor DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use medbill::Doctor;

/// Create Doctor request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDoctorRequest {
    pub name: String,
    /// License code (CRM), unique
    pub crm: String,
    pub specialty: String,
}

/// Update Doctor request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDoctorRequest {
    pub name: Option<String>,
    pub crm: Option<String>,
    pub specialty: Option<String>,
}

/// Doctor response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorResponse {
    pub id: Uuid,
    pub name: String,
    pub crm: String,
    pub specialty: String,
    pub created_at: DateTime<Utc>,
}

impl From<Doctor> for DoctorResponse {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name,
            crm: doctor.crm,
            specialty: doctor.specialty,
            created_at: doctor.created_at,
        }
    }
}
