//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and the financial summary engine.

mod doctor_service;
mod hospital_service;
mod production_service;
mod summary_service;
mod transfer_service;

pub use doctor_service::DoctorService;
pub use hospital_service::HospitalService;
pub use production_service::ProductionService;
pub use summary_service::SummaryService;
pub use transfer_service::TransferService;

use medbill::{DoctorRepository, DomainError, HospitalRepository, RecordStore};
use uuid::Uuid;

/// Productions and transfers may only point at existing doctors and hospitals
async fn ensure_references<S: RecordStore + ?Sized>(
    store: &S,
    doctor: Uuid,
    hospital: Uuid,
) -> Result<(), DomainError> {
    if !DoctorRepository::exists(store, doctor).await? {
        return Err(DomainError::validation(format!("doctor {} does not exist", doctor)));
    }
    if !HospitalRepository::exists(store, hospital).await? {
        return Err(DomainError::validation(format!(
            "hospital {} does not exist",
            hospital
        )));
    }
    Ok(())
}
