//! Transfer Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Transfer};

/// Repository interface for Transfer entities
#[async_trait]
pub trait TransferRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transfer>, DomainError>;

    /// Save a Transfer (insert or update). `created_at` is kept on update.
    async fn save(&self, transfer: &Transfer) -> Result<Transfer, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
