//! Hospital Application Service (Use Case)

use std::sync::Arc;
use uuid::Uuid;

use medbill::{DomainError, Hospital, HospitalRepository};

/// Application service for Hospital operations
pub struct HospitalService<R: HospitalRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: HospitalRepository + ?Sized> HospitalService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Hospital>, DomainError> {
        self.repo.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Hospital>, DomainError> {
        self.repo.find_by_id(id).await
    }

    pub async fn create(&self, name: String, code: String) -> Result<Hospital, DomainError> {
        let hospital = Hospital::new(name, code);
        hospital.validate()?;
        let saved = self.repo.save(&hospital).await?;

        tracing::info!("Created Hospital: {} ({}) - {}", saved.name, saved.id, saved.code);

        Ok(saved)
    }

    /// Update a Hospital; absent fields keep their current value
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        code: Option<String>,
    ) -> Result<Hospital, DomainError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hospital", id))?;

        let updated = Hospital {
            name: name.map(|s| s.trim().to_string()).unwrap_or(current.name),
            code: code.map(|s| s.trim().to_string()).unwrap_or(current.code),
            ..current
        };
        updated.validate()?;

        self.repo.save(&updated).await
    }

    /// Delete a Hospital along with its productions and transfers
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("Deleted Hospital: {}", id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medbill::InMemoryRecordStore;

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let service = HospitalService::new(Arc::new(InMemoryRecordStore::new()));
        let first = service
            .create("Santa Casa".into(), "SC-01".into())
            .await
            .unwrap();
        let second = service
            .create("Hospital das Clinicas".into(), "HC-01".into())
            .await
            .unwrap();

        let err = service
            .update(second.id, None, Some(first.code.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_reports_missing() {
        let service = HospitalService::new(Arc::new(InMemoryRecordStore::new()));
        let hospital = service.create("Santa Casa".into(), "SC-01".into()).await.unwrap();
        assert!(service.delete(hospital.id).await.unwrap());
        assert!(!service.delete(hospital.id).await.unwrap());
        assert!(service.get_by_id(hospital.id).await.unwrap().is_none());
    }
}
