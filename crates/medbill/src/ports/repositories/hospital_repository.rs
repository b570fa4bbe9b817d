//! Hospital Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Hospital};

/// Repository interface for Hospital entities
#[async_trait]
pub trait HospitalRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hospital>, DomainError>;

    /// Find all Hospitals, ordered by name
    async fn find_all(&self) -> Result<Vec<Hospital>, DomainError>;

    /// Save a Hospital (insert or update). Codes are unique.
    async fn save(&self, hospital: &Hospital) -> Result<Hospital, DomainError>;

    /// Delete a Hospital by ID, cascading to its productions and transfers
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError>;
}
