//! Doctor Repository Port
//!
//! Abstract interface for Doctor persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Doctor};

/// Repository interface for Doctor entities
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// Find a Doctor by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, DomainError>;

    /// Find all Doctors, ordered by name
    async fn find_all(&self) -> Result<Vec<Doctor>, DomainError>;

    /// Save a Doctor (insert or update).
    ///
    /// Fails with `Conflict` when another doctor already holds the CRM.
    async fn save(&self, doctor: &Doctor) -> Result<Doctor, DomainError>;

    /// Delete a Doctor by ID, cascading to its productions and transfers
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Check if Doctor exists
    async fn exists(&self, id: Uuid) -> Result<bool, DomainError>;
}
