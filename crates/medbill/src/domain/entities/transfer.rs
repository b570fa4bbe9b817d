//! Transfer - Payment made to a doctor
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::LedgerEntry;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::validate_amount;

/// Transfer - payment to a doctor, attributed to a hospital, on a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: Uuid,
    pub doctor: Uuid,
    pub hospital: Uuid,
    pub amount: Decimal,
    pub transfer_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transfer {
    /// Create a new Transfer with generated ID and creation timestamp
    pub fn new(doctor: Uuid, hospital: Uuid, amount: Decimal, transfer_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            doctor,
            hospital,
            amount,
            transfer_date,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_amount(self.amount)
    }
}

impl LedgerEntry for Transfer {
    fn doctor_id(&self) -> Uuid {
        self.doctor
    }

    fn hospital_id(&self) -> Uuid {
        self.hospital
    }

    fn entry_date(&self) -> NaiveDate {
        self.transfer_date
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}
