//! Financial Summary Engine
//!
//! Aggregates a doctor's productions and transfers over an optional,
//! inclusive date window:
//!
//! - `total_produced`: sum of matching production amounts
//! - `total_transferred`: sum of matching transfer amounts
//! - `balance`: `total_produced - total_transferred` (may be negative)
//!
//! Hospital is not a filter dimension here. An inverted window
//! (`start_date > end_date`) matches nothing and yields a zero summary.
//! Sums are exact `Decimal`; rounding to cents happens only in
//! [`FinancialSummary::rounded`].

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::LedgerEntry;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{round_currency, DateRange, RecordFilter};
use crate::ports::LedgerSource;

/// Parameters of a summary request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryQuery {
    pub doctor_id: Uuid,
    pub period: DateRange,
}

impl SummaryQuery {
    pub fn new(doctor_id: Uuid, period: DateRange) -> Self {
        Self { doctor_id, period }
    }

    /// Whole history of a doctor
    pub fn all_time(doctor_id: Uuid) -> Self {
        Self::new(doctor_id, DateRange::unbounded())
    }

    /// Store filter selecting exactly the records this query aggregates
    pub fn record_filter(&self) -> RecordFilter {
        RecordFilter::for_doctor(self.doctor_id, self.period)
    }
}

/// Aggregate financial position of a doctor. Derived, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_produced: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_transferred: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl FinancialSummary {
    pub fn new(total_produced: Decimal, total_transferred: Decimal) -> Self {
        Self {
            total_produced,
            total_transferred,
            balance: total_produced - total_transferred,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total_produced.is_zero() && self.total_transferred.is_zero()
    }

    /// Copy rounded to the currency's minor unit, for presentation
    pub fn rounded(&self) -> Self {
        Self {
            total_produced: round_currency(self.total_produced),
            total_transferred: round_currency(self.total_transferred),
            balance: round_currency(self.balance),
        }
    }
}

/// Sum the amounts of every entry matching `filter`. Empty input sums to zero.
fn sum_matching<'a, E, I>(entries: I, filter: &RecordFilter) -> Decimal
where
    E: LedgerEntry + 'a,
    I: IntoIterator<Item = &'a E>,
{
    entries
        .into_iter()
        .filter(|entry| filter.matches(*entry))
        .map(|entry| entry.amount())
        .sum()
}

/// Compute the summary for `query` over the given records.
///
/// Records outside the query are ignored, so callers may pass a superset.
pub fn summarize<'a, P, T>(productions: P, transfers: T, query: &SummaryQuery) -> FinancialSummary
where
    P: IntoIterator<Item = &'a crate::domain::Production>,
    T: IntoIterator<Item = &'a crate::domain::Transfer>,
{
    let filter = query.record_filter();
    FinancialSummary::new(
        sum_matching(productions, &filter),
        sum_matching(transfers, &filter),
    )
}

/// Runs [`summarize`] over one snapshot read from a [`LedgerSource`]
pub struct FinancialSummaryEngine<S: LedgerSource + ?Sized> {
    source: Arc<S>,
}

impl<S: LedgerSource + ?Sized> Clone for FinancialSummaryEngine<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: LedgerSource + ?Sized> FinancialSummaryEngine<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Read failures are returned as-is; they never turn into a zero summary.
    pub async fn summarize(&self, query: &SummaryQuery) -> Result<FinancialSummary, DomainError> {
        let snapshot = self.source.snapshot(&query.record_filter()).await?;
        let summary = summarize(&snapshot.productions, &snapshot.transfers, query);

        tracing::debug!(
            doctor_id = %query.doctor_id,
            productions = snapshot.productions.len(),
            transfers = snapshot.transfers.len(),
            balance = %summary.balance,
            "Computed financial summary"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRecordStore;
    use crate::domain::{LedgerSnapshot, Production, Transfer};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn range(start: Option<&str>, end: Option<&str>) -> DateRange {
        DateRange::new(start.map(date), end.map(date))
    }

    struct Fixture {
        doctor: Uuid,
        productions: Vec<Production>,
        transfers: Vec<Transfer>,
    }

    /// Productions 1000.00 (2024-01-05) and 500.00 (2024-02-10),
    /// transfer 300.00 (2024-01-20), plus noise from another doctor.
    fn fixture() -> Fixture {
        let doctor = Uuid::new_v4();
        let other = Uuid::new_v4();
        let hospital = Uuid::new_v4();
        Fixture {
            doctor,
            productions: vec![
                Production::new(doctor, hospital, dec!(1000.00), date("2024-01-05")),
                Production::new(doctor, hospital, dec!(500.00), date("2024-02-10")),
                Production::new(other, hospital, dec!(9999.99), date("2024-01-06")),
            ],
            transfers: vec![
                Transfer::new(doctor, hospital, dec!(300.00), date("2024-01-20")),
                Transfer::new(other, hospital, dec!(50.00), date("2024-01-21")),
            ],
        }
    }

    fn run(f: &Fixture, period: DateRange) -> FinancialSummary {
        summarize(&f.productions, &f.transfers, &SummaryQuery::new(f.doctor, period))
    }

    #[test]
    fn test_all_time_summary() {
        let f = fixture();
        let summary = run(&f, DateRange::unbounded());
        assert_eq!(summary.total_produced, dec!(1500.00));
        assert_eq!(summary.total_transferred, dec!(300.00));
        assert_eq!(summary.balance, dec!(1200.00));
    }

    #[test]
    fn test_start_date_only() {
        let f = fixture();
        let summary = run(&f, range(Some("2024-02-01"), None));
        assert_eq!(summary, FinancialSummary::new(dec!(500.00), dec!(0)));
        assert_eq!(summary.balance, dec!(500.00));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let f = fixture();
        let summary = run(&f, range(Some("2024-01-05"), Some("2024-02-10")));
        assert_eq!(summary.total_produced, dec!(1500.00));

        let single_day = run(&f, range(Some("2024-01-20"), Some("2024-01-20")));
        assert_eq!(single_day, FinancialSummary::new(dec!(0), dec!(300.00)));
    }

    #[test]
    fn test_no_records_is_exact_zero() {
        let summary = summarize(
            &Vec::<Production>::new(),
            &Vec::<Transfer>::new(),
            &SummaryQuery::all_time(Uuid::new_v4()),
        );
        assert_eq!(summary, FinancialSummary::default());
        assert!(summary.is_zero());
        assert_eq!(summary.balance, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_doctor_is_zero() {
        let f = fixture();
        let summary = summarize(
            &f.productions,
            &f.transfers,
            &SummaryQuery::all_time(Uuid::new_v4()),
        );
        assert!(summary.is_zero());
    }

    #[test]
    fn test_inverted_range_is_zero() {
        let f = fixture();
        let summary = run(&f, range(Some("2024-02-28"), Some("2024-01-01")));
        assert_eq!(summary, FinancialSummary::default());
    }

    #[test]
    fn test_negative_balance_is_not_clamped() {
        let doctor = Uuid::new_v4();
        let transfers = vec![Transfer::new(
            doctor,
            Uuid::new_v4(),
            dec!(200.00),
            date("2024-03-01"),
        )];
        let summary = summarize(
            &Vec::<Production>::new(),
            &transfers,
            &SummaryQuery::all_time(doctor),
        );
        assert_eq!(summary.total_produced, dec!(0));
        assert_eq!(summary.total_transferred, dec!(200.00));
        assert_eq!(summary.balance, dec!(-200.00));
    }

    #[test]
    fn test_hospital_does_not_affect_summary() {
        let doctor = Uuid::new_v4();
        let productions = vec![
            Production::new(doctor, Uuid::new_v4(), dec!(10), date("2024-01-01")),
            Production::new(doctor, Uuid::new_v4(), dec!(20), date("2024-01-02")),
        ];
        let summary = summarize(&productions, &Vec::<Transfer>::new(), &SummaryQuery::all_time(doctor));
        assert_eq!(summary.total_produced, dec!(30));
    }

    #[test]
    fn test_order_independent() {
        let mut f = fixture();
        let forward = run(&f, DateRange::unbounded());
        f.productions.reverse();
        f.transfers.reverse();
        assert_eq!(run(&f, DateRange::unbounded()), forward);
    }

    #[test]
    fn test_range_monotonicity() {
        let f = fixture();
        let windows = [
            range(Some("2024-01-10"), Some("2024-01-31")),
            range(Some("2024-01-05"), Some("2024-01-31")),
            range(Some("2024-01-05"), Some("2024-02-10")),
            range(None, Some("2024-02-10")),
            DateRange::unbounded(),
        ];
        for pair in windows.windows(2) {
            let narrow = run(&f, pair[0]);
            let wide = run(&f, pair[1]);
            assert!(narrow.total_produced <= wide.total_produced);
            assert!(narrow.total_transferred <= wide.total_transferred);
        }
    }

    #[test]
    fn test_accumulates_exactly_and_rounds_for_display() {
        let doctor = Uuid::new_v4();
        let hospital = Uuid::new_v4();
        let productions: Vec<Production> = (0..10)
            .map(|_| Production::new(doctor, hospital, dec!(0.10), date("2024-01-01")))
            .collect();
        let summary = summarize(&productions, &Vec::<Transfer>::new(), &SummaryQuery::all_time(doctor));
        assert_eq!(summary.total_produced, dec!(1.00));

        let uneven = FinancialSummary::new(dec!(10.005), dec!(0.001));
        let rounded = uneven.rounded();
        assert_eq!(rounded.total_produced.to_string(), "10.00");
        assert_eq!(rounded.total_transferred.to_string(), "0.00");
        assert_eq!(rounded.balance.to_string(), "10.00");
    }

    #[test]
    fn test_serializes_as_json_numbers() {
        let json = serde_json::to_value(FinancialSummary::new(dec!(1500.00), dec!(300.00))).unwrap();
        assert_eq!(json["total_produced"], serde_json::json!(1500.0));
        assert_eq!(json["total_transferred"], serde_json::json!(300.0));
        assert_eq!(json["balance"], serde_json::json!(1200.0));
    }

    #[tokio::test]
    async fn test_engine_reads_from_store() {
        let f = fixture();
        let store = Arc::new(InMemoryRecordStore::new());
        store.seed(f.productions.clone(), f.transfers.clone()).await;

        let engine = FinancialSummaryEngine::new(store);
        let summary = engine
            .summarize(&SummaryQuery::new(f.doctor, range(Some("2024-02-01"), None)))
            .await
            .unwrap();
        assert_eq!(summary, FinancialSummary::new(dec!(500.00), dec!(0)));
    }

    struct FailingSource;

    #[async_trait]
    impl LedgerSource for FailingSource {
        async fn list_productions(&self, _: &RecordFilter) -> Result<Vec<Production>, DomainError> {
            Err(DomainError::Repository("connection refused".to_string()))
        }

        async fn list_transfers(&self, _: &RecordFilter) -> Result<Vec<Transfer>, DomainError> {
            Err(DomainError::Repository("connection refused".to_string()))
        }

        async fn snapshot(&self, _: &RecordFilter) -> Result<LedgerSnapshot, DomainError> {
            Err(DomainError::Repository("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_zero_summary() {
        let engine = FinancialSummaryEngine::new(Arc::new(FailingSource));
        let result = engine.summarize(&SummaryQuery::all_time(Uuid::new_v4())).await;
        assert!(matches!(result, Err(DomainError::Repository(_))));
    }
}
