//! In-memory record store
//!
//! Implements every repository port over plain vectors guarded by a single
//! lock. Each instance is independent; construct one per test or per
//! embedding application and share it through `Arc`.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    errors::DomainError, Doctor, Hospital, LedgerEntry, LedgerSnapshot, Production, RecordFilter,
    Transfer,
};
use crate::ports::{
    DoctorRepository, HospitalRepository, LedgerSource, ProductionRepository, TransferRepository,
};

#[derive(Debug, Default)]
struct Tables {
    doctors: Vec<Doctor>,
    hospitals: Vec<Hospital>,
    productions: Vec<Production>,
    transfers: Vec<Transfer>,
}

/// Record store kept entirely in process memory
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: RwLock<Tables>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load productions and transfers without referential checks
    pub async fn seed(&self, productions: Vec<Production>, transfers: Vec<Transfer>) {
        let mut tables = self.tables.write().await;
        tables.productions.extend(productions);
        tables.transfers.extend(transfers);
    }
}

/// Clone the entries matching `filter`, newest record date first
fn select<E: LedgerEntry + Clone>(
    entries: &[E],
    filter: &RecordFilter,
    created_at: impl Fn(&E) -> chrono::DateTime<chrono::Utc>,
) -> Vec<E> {
    let mut selected: Vec<E> = entries.iter().filter(|e| filter.matches(*e)).cloned().collect();
    selected.sort_by(|a, b| {
        b.entry_date()
            .cmp(&a.entry_date())
            .then_with(|| created_at(b).cmp(&created_at(a)))
    });
    selected
}

/// Insert or replace by id, keeping the original `created_at`
fn upsert<T: Clone>(
    rows: &mut Vec<T>,
    row: &T,
    id: impl Fn(&T) -> Uuid,
    keep_created: impl Fn(&T, &T) -> T,
) -> T {
    match rows.iter().position(|existing| id(existing) == id(row)) {
        Some(index) => {
            let merged = keep_created(&rows[index], row);
            rows[index] = merged.clone();
            merged
        }
        None => {
            rows.push(row.clone());
            row.clone()
        }
    }
}

#[async_trait]
impl DoctorRepository for InMemoryRecordStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.doctors.iter().find(|d| d.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Doctor>, DomainError> {
        let tables = self.tables.read().await;
        let mut doctors = tables.doctors.clone();
        doctors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(doctors)
    }

    async fn save(&self, doctor: &Doctor) -> Result<Doctor, DomainError> {
        let mut tables = self.tables.write().await;
        if tables
            .doctors
            .iter()
            .any(|d| d.crm == doctor.crm && d.id != doctor.id)
        {
            return Err(DomainError::Conflict(format!(
                "doctor with crm '{}' already exists",
                doctor.crm
            )));
        }
        Ok(upsert(&mut tables.doctors, doctor, |d| d.id, |old, new| Doctor {
            created_at: old.created_at,
            ..new.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.doctors.len();
        tables.doctors.retain(|d| d.id != id);
        if tables.doctors.len() == before {
            return Ok(false);
        }
        tables.productions.retain(|p| p.doctor != id);
        tables.transfers.retain(|t| t.doctor != id);
        Ok(true)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.doctors.iter().any(|d| d.id == id))
    }
}

#[async_trait]
impl HospitalRepository for InMemoryRecordStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hospital>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.hospitals.iter().find(|h| h.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Hospital>, DomainError> {
        let tables = self.tables.read().await;
        let mut hospitals = tables.hospitals.clone();
        hospitals.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hospitals)
    }

    async fn save(&self, hospital: &Hospital) -> Result<Hospital, DomainError> {
        let mut tables = self.tables.write().await;
        if tables
            .hospitals
            .iter()
            .any(|h| h.code == hospital.code && h.id != hospital.id)
        {
            return Err(DomainError::Conflict(format!(
                "hospital with code '{}' already exists",
                hospital.code
            )));
        }
        Ok(upsert(&mut tables.hospitals, hospital, |h| h.id, |old, new| Hospital {
            created_at: old.created_at,
            ..new.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.hospitals.len();
        tables.hospitals.retain(|h| h.id != id);
        if tables.hospitals.len() == before {
            return Ok(false);
        }
        tables.productions.retain(|p| p.hospital != id);
        tables.transfers.retain(|t| t.hospital != id);
        Ok(true)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.hospitals.iter().any(|h| h.id == id))
    }
}

#[async_trait]
impl ProductionRepository for InMemoryRecordStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Production>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.productions.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, production: &Production) -> Result<Production, DomainError> {
        let mut tables = self.tables.write().await;
        Ok(upsert(&mut tables.productions, production, |p| p.id, |old, new| Production {
            created_at: old.created_at,
            ..new.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.productions.len();
        tables.productions.retain(|p| p.id != id);
        Ok(tables.productions.len() < before)
    }
}

#[async_trait]
impl TransferRepository for InMemoryRecordStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transfer>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.transfers.iter().find(|t| t.id == id).cloned())
    }

    async fn save(&self, transfer: &Transfer) -> Result<Transfer, DomainError> {
        let mut tables = self.tables.write().await;
        Ok(upsert(&mut tables.transfers, transfer, |t| t.id, |old, new| Transfer {
            created_at: old.created_at,
            ..new.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.transfers.len();
        tables.transfers.retain(|t| t.id != id);
        Ok(tables.transfers.len() < before)
    }
}

#[async_trait]
impl LedgerSource for InMemoryRecordStore {
    async fn list_productions(&self, filter: &RecordFilter) -> Result<Vec<Production>, DomainError> {
        let tables = self.tables.read().await;
        Ok(select(&tables.productions, filter, |p| p.created_at))
    }

    async fn list_transfers(&self, filter: &RecordFilter) -> Result<Vec<Transfer>, DomainError> {
        let tables = self.tables.read().await;
        Ok(select(&tables.transfers, filter, |t| t.created_at))
    }

    async fn snapshot(&self, filter: &RecordFilter) -> Result<LedgerSnapshot, DomainError> {
        // One guard for both collections
        let tables = self.tables.read().await;
        Ok(LedgerSnapshot {
            productions: select(&tables.productions, filter, |p| p.created_at),
            transfers: select(&tables.transfers, filter, |t| t.created_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateRange;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_crm_conflicts() {
        let store = InMemoryRecordStore::new();
        let first = Doctor::new("Ana".into(), "CRM-1".into(), "Cardiologia".into());
        DoctorRepository::save(&store, &first).await.unwrap();

        let second = Doctor::new("Bruno".into(), "CRM-1".into(), "Pediatria".into());
        let err = DoctorRepository::save(&store, &second).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Re-saving the same doctor is an update, not a conflict
        let renamed = Doctor {
            name: "Ana Lima".into(),
            ..first.clone()
        };
        let saved = DoctorRepository::save(&store, &renamed).await.unwrap();
        assert_eq!(saved.name, "Ana Lima");
        assert_eq!(saved.created_at, first.created_at);
    }

    #[tokio::test]
    async fn test_delete_doctor_cascades() {
        let store = InMemoryRecordStore::new();
        let doctor = Doctor::new("Ana".into(), "CRM-1".into(), "Cardiologia".into());
        DoctorRepository::save(&store, &doctor).await.unwrap();
        let hospital = Uuid::new_v4();
        store
            .seed(
                vec![Production::new(doctor.id, hospital, dec!(10), day(1))],
                vec![Transfer::new(doctor.id, hospital, dec!(5), day(2))],
            )
            .await;

        assert!(DoctorRepository::delete(&store, doctor.id).await.unwrap());
        let snapshot = store.snapshot(&RecordFilter::default()).await.unwrap();
        assert!(snapshot.productions.is_empty());
        assert!(snapshot.transfers.is_empty());
        assert!(!DoctorRepository::delete(&store, doctor.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_listing_filters_and_orders_newest_first() {
        let store = InMemoryRecordStore::new();
        let doctor = Uuid::new_v4();
        let hospital_a = Uuid::new_v4();
        let hospital_b = Uuid::new_v4();
        store
            .seed(
                vec![
                    Production::new(doctor, hospital_a, dec!(1), day(3)),
                    Production::new(doctor, hospital_b, dec!(2), day(9)),
                    Production::new(doctor, hospital_a, dec!(3), day(6)),
                    Production::new(Uuid::new_v4(), hospital_a, dec!(4), day(7)),
                ],
                vec![],
            )
            .await;

        let all = store
            .list_productions(&RecordFilter::for_doctor(doctor, DateRange::unbounded()))
            .await
            .unwrap();
        let dates: Vec<_> = all.iter().map(|p| p.production_date).collect();
        assert_eq!(dates, vec![day(9), day(6), day(3)]);

        let at_a = store
            .list_productions(
                &RecordFilter::for_doctor(doctor, DateRange::new(Some(day(4)), None))
                    .with_hospital(hospital_a),
            )
            .await
            .unwrap();
        assert_eq!(at_a.len(), 1);
        assert_eq!(at_a[0].amount, dec!(3));
    }

    #[tokio::test]
    async fn test_instances_are_isolated() {
        let first = InMemoryRecordStore::new();
        let second = InMemoryRecordStore::new();
        first
            .seed(
                vec![Production::new(Uuid::new_v4(), Uuid::new_v4(), dec!(1), day(1))],
                vec![],
            )
            .await;

        let filter = RecordFilter::default();
        assert_eq!(first.list_productions(&filter).await.unwrap().len(), 1);
        assert!(second.list_productions(&filter).await.unwrap().is_empty());
    }
}
