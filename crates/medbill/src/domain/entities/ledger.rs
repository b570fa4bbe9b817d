//! LedgerEntry - Common view over dated, doctor-attributed amounts

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{Production, Transfer};

/// A monetary record attributed to a doctor at a hospital on a calendar date.
///
/// Productions and transfers share this shape, so filtering and summation
/// are written once against this trait.
pub trait LedgerEntry {
    fn doctor_id(&self) -> Uuid;
    fn hospital_id(&self) -> Uuid;
    fn entry_date(&self) -> NaiveDate;
    fn amount(&self) -> Decimal;
}

/// Productions and transfers read from one consistent view of the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub productions: Vec<Production>,
    pub transfers: Vec<Transfer>,
}
