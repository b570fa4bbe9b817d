//! RecordFilter - Query predicate over productions and transfers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::LedgerEntry;
use crate::domain::value_objects::DateRange;

/// Filter for listing ledger records. Every dimension is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub doctor: Option<Uuid>,
    pub hospital: Option<Uuid>,
    #[serde(flatten)]
    pub period: DateRange,
}

impl RecordFilter {
    /// All records of one doctor within `period`, any hospital
    pub fn for_doctor(doctor: Uuid, period: DateRange) -> Self {
        Self {
            doctor: Some(doctor),
            hospital: None,
            period,
        }
    }

    pub fn with_hospital(mut self, hospital: Uuid) -> Self {
        self.hospital = Some(hospital);
        self
    }

    pub fn matches<E: LedgerEntry + ?Sized>(&self, entry: &E) -> bool {
        self.doctor.map_or(true, |d| entry.doctor_id() == d)
            && self.hospital.map_or(true, |h| entry.hospital_id() == h)
            && self.period.contains(entry.entry_date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Production;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn production(doctor: Uuid, hospital: Uuid, day: u32) -> Production {
        Production::new(
            doctor,
            hospital,
            dec!(100),
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let p = production(Uuid::new_v4(), Uuid::new_v4(), 10);
        assert!(RecordFilter::default().matches(&p));
    }

    #[test]
    fn test_doctor_and_hospital_dimensions() {
        let doctor = Uuid::new_v4();
        let hospital = Uuid::new_v4();
        let p = production(doctor, hospital, 10);

        let filter = RecordFilter::for_doctor(doctor, DateRange::unbounded());
        assert!(filter.matches(&p));
        assert!(filter.with_hospital(hospital).matches(&p));
        assert!(!filter.with_hospital(Uuid::new_v4()).matches(&p));
        assert!(!RecordFilter::for_doctor(Uuid::new_v4(), DateRange::unbounded()).matches(&p));
    }

    #[test]
    fn test_period_dimension() {
        let doctor = Uuid::new_v4();
        let p = production(doctor, Uuid::new_v4(), 10);
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d);

        assert!(RecordFilter::for_doctor(doctor, DateRange::new(day(10), day(10))).matches(&p));
        assert!(!RecordFilter::for_doctor(doctor, DateRange::new(day(11), None)).matches(&p));
        assert!(!RecordFilter::for_doctor(doctor, DateRange::new(None, day(9))).matches(&p));
    }
}
