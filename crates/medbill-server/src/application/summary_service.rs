//! Summary Application Service (Use Case)
//!
//! Resolves the doctor, then delegates to the financial summary engine.

use std::sync::Arc;

use uuid::Uuid;

use medbill::{
    DateRange, DoctorRepository, DomainError, FinancialSummary, FinancialSummaryEngine,
    RecordStore, SummaryQuery,
};

/// Application service for financial summaries
pub struct SummaryService<S: RecordStore + ?Sized> {
    store: Arc<S>,
    engine: FinancialSummaryEngine<S>,
}

impl<S: RecordStore + ?Sized> SummaryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        let engine = FinancialSummaryEngine::new(Arc::clone(&store));
        Self { store, engine }
    }

    /// Summary for an existing doctor over `period`.
    ///
    /// Unknown doctors are reported as `NotFound`; the engine itself would
    /// answer with a zero summary.
    pub async fn for_doctor(
        &self,
        doctor_id: Uuid,
        period: DateRange,
    ) -> Result<FinancialSummary, DomainError> {
        if !DoctorRepository::exists(&*self.store, doctor_id).await? {
            return Err(DomainError::not_found("Doctor", doctor_id));
        }

        if period.is_inverted() {
            tracing::debug!(
                doctor_id = %doctor_id,
                start_date = ?period.start,
                end_date = ?period.end,
                "Inverted date range, summary will be zero"
            );
        }

        self.engine.summarize(&SummaryQuery::new(doctor_id, period)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use medbill::{Doctor, InMemoryRecordStore, Production, Transfer};
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn store_with_doctor() -> (Arc<InMemoryRecordStore>, Uuid) {
        let store = Arc::new(InMemoryRecordStore::new());
        let doctor = Doctor::new("Ana".into(), "CRM-1".into(), "Cardiologia".into());
        DoctorRepository::save(&*store, &doctor).await.unwrap();
        (store, doctor.id)
    }

    #[tokio::test]
    async fn test_summary_for_existing_doctor() {
        let (store, doctor) = store_with_doctor().await;
        let hospital = Uuid::new_v4();
        store
            .seed(
                vec![
                    Production::new(doctor, hospital, dec!(1000.00), date("2024-01-05")),
                    Production::new(doctor, hospital, dec!(500.00), date("2024-02-10")),
                ],
                vec![Transfer::new(doctor, hospital, dec!(300.00), date("2024-01-20"))],
            )
            .await;

        let service = SummaryService::new(store);
        let all = service.for_doctor(doctor, DateRange::unbounded()).await.unwrap();
        assert_eq!(all, FinancialSummary::new(dec!(1500.00), dec!(300.00)));
        assert_eq!(all.balance, dec!(1200.00));
    }

    #[tokio::test]
    async fn test_doctor_without_records_is_zero() {
        let (store, doctor) = store_with_doctor().await;
        let service = SummaryService::new(store);
        let summary = service.for_doctor(doctor, DateRange::unbounded()).await.unwrap();
        assert!(summary.is_zero());
    }

    #[tokio::test]
    async fn test_unknown_doctor_is_not_found() {
        let service = SummaryService::new(Arc::new(InMemoryRecordStore::new()));
        let err = service
            .for_doctor(Uuid::new_v4(), DateRange::unbounded())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_inverted_range_is_zero() {
        let (store, doctor) = store_with_doctor().await;
        store
            .seed(
                vec![Production::new(doctor, Uuid::new_v4(), dec!(10), date("2024-01-15"))],
                vec![],
            )
            .await;
        let service = SummaryService::new(store);
        let summary = service
            .for_doctor(
                doctor,
                DateRange::new(Some(date("2024-01-31")), Some(date("2024-01-01"))),
            )
            .await
            .unwrap();
        assert_eq!(summary, FinancialSummary::default());
    }
}
