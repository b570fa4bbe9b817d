//! Transfer Application Service (Use Case)
//!
//! Orchestrates domain operations for Transfer management.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use medbill::{DomainError, RecordFilter, RecordStore, Transfer, TransferRepository};

use super::ensure_references;

/// Application service for Transfer operations
pub struct TransferService<S: RecordStore + ?Sized> {
    store: Arc<S>,
}

impl<S: RecordStore + ?Sized> TransferService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// List Transfers matching the filter, newest first
    pub async fn list(&self, filter: &RecordFilter) -> Result<Vec<Transfer>, DomainError> {
        self.store.list_transfers(filter).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Transfer>, DomainError> {
        TransferRepository::find_by_id(&*self.store, id).await
    }

    /// Record a new Transfer for an existing doctor and hospital
    pub async fn create(
        &self,
        doctor: Uuid,
        hospital: Uuid,
        amount: Decimal,
        transfer_date: NaiveDate,
    ) -> Result<Transfer, DomainError> {
        let transfer = Transfer::new(doctor, hospital, amount, transfer_date);
        transfer.validate()?;
        ensure_references(&*self.store, doctor, hospital).await?;

        let saved = TransferRepository::save(&*self.store, &transfer).await?;

        tracing::info!(
            "Created Transfer: {} - doctor {} at hospital {} ({} on {})",
            saved.id,
            saved.doctor,
            saved.hospital,
            saved.amount,
            saved.transfer_date
        );

        Ok(saved)
    }

    /// Update a Transfer; absent fields keep their current value
    pub async fn update(
        &self,
        id: Uuid,
        doctor: Option<Uuid>,
        hospital: Option<Uuid>,
        amount: Option<Decimal>,
        transfer_date: Option<NaiveDate>,
    ) -> Result<Transfer, DomainError> {
        let current = TransferRepository::find_by_id(&*self.store, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Transfer", id))?;

        let updated = Transfer {
            doctor: doctor.unwrap_or(current.doctor),
            hospital: hospital.unwrap_or(current.hospital),
            amount: amount.unwrap_or(current.amount),
            transfer_date: transfer_date.unwrap_or(current.transfer_date),
            ..current
        };
        updated.validate()?;
        if doctor.is_some() || hospital.is_some() {
            ensure_references(&*self.store, updated.doctor, updated.hospital).await?;
        }

        let saved = TransferRepository::save(&*self.store, &updated).await?;
        tracing::info!("Updated Transfer: {}", saved.id);
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = TransferRepository::delete(&*self.store, id).await?;
        if deleted {
            tracing::info!("Deleted Transfer: {}", id);
        }
        Ok(deleted)
    }
}
