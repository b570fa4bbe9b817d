//! Production Application Service (Use Case)
//!
//! Orchestrates domain operations for Production management.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use medbill::{DomainError, Production, ProductionRepository, RecordFilter, RecordStore};

use super::ensure_references;

/// Application service for Production operations
pub struct ProductionService<S: RecordStore + ?Sized> {
    store: Arc<S>,
}

impl<S: RecordStore + ?Sized> ProductionService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// List Productions matching the filter, newest first
    pub async fn list(&self, filter: &RecordFilter) -> Result<Vec<Production>, DomainError> {
        self.store.list_productions(filter).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Production>, DomainError> {
        ProductionRepository::find_by_id(&*self.store, id).await
    }

    /// Record a new Production for an existing doctor and hospital
    pub async fn create(
        &self,
        doctor: Uuid,
        hospital: Uuid,
        amount: Decimal,
        production_date: NaiveDate,
    ) -> Result<Production, DomainError> {
        let production = Production::new(doctor, hospital, amount, production_date);
        production.validate()?;
        ensure_references(&*self.store, doctor, hospital).await?;

        let saved = ProductionRepository::save(&*self.store, &production).await?;

        tracing::info!(
            "Created Production: {} - doctor {} at hospital {} ({} on {})",
            saved.id,
            saved.doctor,
            saved.hospital,
            saved.amount,
            saved.production_date
        );

        Ok(saved)
    }

    /// Update a Production; absent fields keep their current value
    pub async fn update(
        &self,
        id: Uuid,
        doctor: Option<Uuid>,
        hospital: Option<Uuid>,
        amount: Option<Decimal>,
        production_date: Option<NaiveDate>,
    ) -> Result<Production, DomainError> {
        let current = ProductionRepository::find_by_id(&*self.store, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Production", id))?;

        let updated = Production {
            doctor: doctor.unwrap_or(current.doctor),
            hospital: hospital.unwrap_or(current.hospital),
            amount: amount.unwrap_or(current.amount),
            production_date: production_date.unwrap_or(current.production_date),
            ..current
        };
        updated.validate()?;
        if doctor.is_some() || hospital.is_some() {
            ensure_references(&*self.store, updated.doctor, updated.hospital).await?;
        }

        let saved = ProductionRepository::save(&*self.store, &updated).await?;
        tracing::info!("Updated Production: {}", saved.id);
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = ProductionRepository::delete(&*self.store, id).await?;
        if deleted {
            tracing::info!("Deleted Production: {}", id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medbill::{DateRange, Doctor, DoctorRepository, Hospital, HospitalRepository, InMemoryRecordStore};
    use rust_decimal_macros::dec;

    struct Setup {
        service: ProductionService<InMemoryRecordStore>,
        doctor: Uuid,
        hospital: Uuid,
    }

    async fn setup() -> Setup {
        let store = Arc::new(InMemoryRecordStore::new());
        let doctor = Doctor::new("Ana".into(), "CRM-1".into(), "Cardiologia".into());
        let hospital = Hospital::new("Santa Casa".into(), "SC-01".into());
        DoctorRepository::save(&*store, &doctor).await.unwrap();
        HospitalRepository::save(&*store, &hospital).await.unwrap();
        Setup {
            service: ProductionService::new(store),
            doctor: doctor.id,
            hospital: hospital.id,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_create_and_filter() {
        let s = setup().await;
        s.service
            .create(s.doctor, s.hospital, dec!(1000.00), date("2024-01-05"))
            .await
            .unwrap();
        s.service
            .create(s.doctor, s.hospital, dec!(500.00), date("2024-02-10"))
            .await
            .unwrap();

        let february = s
            .service
            .list(&RecordFilter::for_doctor(
                s.doctor,
                DateRange::new(Some(date("2024-02-01")), None),
            ))
            .await
            .unwrap();
        assert_eq!(february.len(), 1);
        assert_eq!(february[0].amount, dec!(500.00));
    }

    #[tokio::test]
    async fn test_rejects_negative_amount() {
        let s = setup().await;
        let err = s
            .service
            .create(s.doctor, s.hospital, dec!(-1), date("2024-01-05"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_rejects_unknown_references() {
        let s = setup().await;
        let unknown_doctor = s
            .service
            .create(Uuid::new_v4(), s.hospital, dec!(1), date("2024-01-05"))
            .await
            .unwrap_err();
        assert!(matches!(unknown_doctor, DomainError::Validation(_)));

        let unknown_hospital = s
            .service
            .create(s.doctor, Uuid::new_v4(), dec!(1), date("2024-01-05"))
            .await
            .unwrap_err();
        assert!(matches!(unknown_hospital, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let s = setup().await;
        let created = s
            .service
            .create(s.doctor, s.hospital, dec!(10), date("2024-01-05"))
            .await
            .unwrap();

        let updated = s
            .service
            .update(created.id, None, None, Some(dec!(12.50)), None)
            .await
            .unwrap();
        assert_eq!(updated.amount, dec!(12.50));
        assert_eq!(updated.production_date, date("2024-01-05"));
        assert_eq!(updated.created_at, created.created_at);

        let err = s
            .service
            .update(created.id, Some(Uuid::new_v4()), None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
