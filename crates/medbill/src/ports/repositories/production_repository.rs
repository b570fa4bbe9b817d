//! Production Repository Port
//!
//! Writes and single-record reads. Filtered listing goes through
//! [`LedgerSource`](super::LedgerSource).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Production};

/// Repository interface for Production entities
#[async_trait]
pub trait ProductionRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Production>, DomainError>;

    /// Save a Production (insert or update). `created_at` is kept on update.
    async fn save(&self, production: &Production) -> Result<Production, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
