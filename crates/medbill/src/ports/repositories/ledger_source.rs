//! Ledger Source Port
//!
//! Read side of the record store: filtered listing of productions and
//! transfers. The financial summary engine depends only on this trait, so
//! the same engine runs over PostgreSQL, the HTTP API, or memory.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, LedgerSnapshot, Production, RecordFilter, Transfer};

/// Filtered read access to productions and transfers
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Productions matching `filter`, newest first
    async fn list_productions(&self, filter: &RecordFilter) -> Result<Vec<Production>, DomainError>;

    /// Transfers matching `filter`, newest first
    async fn list_transfers(&self, filter: &RecordFilter) -> Result<Vec<Transfer>, DomainError>;

    /// Both collections from one consistent view of the store.
    ///
    /// The default reads them one after the other; adapters that can offer
    /// snapshot isolation override it.
    async fn snapshot(&self, filter: &RecordFilter) -> Result<LedgerSnapshot, DomainError> {
        let productions = self.list_productions(filter).await?;
        let transfers = self.list_transfers(filter).await?;
        Ok(LedgerSnapshot {
            productions,
            transfers,
        })
    }
}
