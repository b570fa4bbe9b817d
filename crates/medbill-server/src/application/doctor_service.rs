//! Doctor Application Service (Use Case)
//!
//! Orchestrates domain operations for Doctor management.

use std::sync::Arc;
use uuid::Uuid;

use medbill::{Doctor, DoctorRepository, DomainError};

/// Application service for Doctor operations
pub struct DoctorService<R: DoctorRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: DoctorRepository + ?Sized> DoctorService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Get all Doctors
    pub async fn list_all(&self) -> Result<Vec<Doctor>, DomainError> {
        self.repo.find_all().await
    }

    /// Get a Doctor by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Doctor>, DomainError> {
        self.repo.find_by_id(id).await
    }

    /// Create a new Doctor
    pub async fn create(
        &self,
        name: String,
        crm: String,
        specialty: String,
    ) -> Result<Doctor, DomainError> {
        let doctor = Doctor::new(name, crm, specialty);
        doctor.validate()?;
        let saved = self.repo.save(&doctor).await?;

        tracing::info!("Created Doctor: {} ({}) - CRM {}", saved.name, saved.id, saved.crm);

        Ok(saved)
    }

    /// Update a Doctor; absent fields keep their current value
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        crm: Option<String>,
        specialty: Option<String>,
    ) -> Result<Doctor, DomainError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Doctor", id))?;

        let updated = Doctor {
            name: name.map(|s| s.trim().to_string()).unwrap_or(current.name),
            crm: crm.map(|s| s.trim().to_string()).unwrap_or(current.crm),
            specialty: specialty
                .map(|s| s.trim().to_string())
                .unwrap_or(current.specialty),
            ..current
        };
        updated.validate()?;

        let saved = self.repo.save(&updated).await?;
        tracing::info!("Updated Doctor: {} ({})", saved.name, saved.id);
        Ok(saved)
    }

    /// Delete a Doctor along with its productions and transfers
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("Deleted Doctor: {}", id);
        }
        Ok(deleted)
    }
}
