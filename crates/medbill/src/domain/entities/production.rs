//! Production - Billable amount a doctor generates at a hospital
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::LedgerEntry;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::validate_amount;

/// Production - amount billed by a doctor at a hospital on a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub id: Uuid,
    pub doctor: Uuid,
    pub hospital: Uuid,
    pub amount: Decimal,
    pub production_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Production {
    /// Create a new Production with generated ID and creation timestamp
    pub fn new(doctor: Uuid, hospital: Uuid, amount: Decimal, production_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            doctor,
            hospital,
            amount,
            production_date,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_amount(self.amount)
    }
}

impl LedgerEntry for Production {
    fn doctor_id(&self) -> Uuid {
        self.doctor
    }

    fn hospital_id(&self) -> Uuid {
        self.hospital
    }

    fn entry_date(&self) -> NaiveDate {
        self.production_date
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}
