//! Production and Transfer DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use medbill::{DateRange, DomainError, Production, RecordFilter, Transfer};

/// Listing filters. Empty values are ignored, as the web client sends them.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LedgerListQuery {
    /// Doctor ID
    pub doctor: Option<String>,
    /// Hospital ID
    pub hospital: Option<String>,
    /// Inclusive lower bound, YYYY-MM-DD
    pub start_date: Option<String>,
    /// Inclusive upper bound, YYYY-MM-DD
    pub end_date: Option<String>,
}

fn parse_optional_id(field: &str, value: Option<&str>) -> Result<Option<Uuid>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| DomainError::validation(format!("{} must be a UUID, got '{}'", field, raw))),
    }
}

impl LedgerListQuery {
    pub fn to_filter(&self) -> Result<RecordFilter, DomainError> {
        Ok(RecordFilter {
            doctor: parse_optional_id("doctor", self.doctor.as_deref())?,
            hospital: parse_optional_id("hospital", self.hospital.as_deref())?,
            period: DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())?,
        })
    }
}

// ============================================
// Production
// ============================================

/// Create Production request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductionRequest {
    pub doctor: Uuid,
    pub hospital: Uuid,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub production_date: NaiveDate,
}

/// Update Production request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductionRequest {
    pub doctor: Option<Uuid>,
    pub hospital: Option<Uuid>,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    pub production_date: Option<NaiveDate>,
}

/// Production response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductionResponse {
    pub id: Uuid,
    pub doctor: Uuid,
    pub hospital: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub production_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<Production> for ProductionResponse {
    fn from(production: Production) -> Self {
        Self {
            id: production.id,
            doctor: production.doctor,
            hospital: production.hospital,
            amount: production.amount,
            production_date: production.production_date,
            created_at: production.created_at,
        }
    }
}

// ============================================
// Transfer
// ============================================

/// Create Transfer request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransferRequest {
    pub doctor: Uuid,
    pub hospital: Uuid,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub transfer_date: NaiveDate,
}

/// Update Transfer request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTransferRequest {
    pub doctor: Option<Uuid>,
    pub hospital: Option<Uuid>,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    pub transfer_date: Option<NaiveDate>,
}

/// Transfer response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransferResponse {
    pub id: Uuid,
    pub doctor: Uuid,
    pub hospital: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub transfer_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<Transfer> for TransferResponse {
    fn from(transfer: Transfer) -> Self {
        Self {
            id: transfer.id,
            doctor: transfer.doctor,
            hospital: transfer.hospital,
            amount: transfer.amount,
            transfer_date: transfer.transfer_date,
            created_at: transfer.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_values_are_ignored() {
        let query = LedgerListQuery {
            doctor: Some(String::new()),
            hospital: None,
            start_date: Some(String::new()),
            end_date: Some("2024-02-10".to_string()),
        };
        let filter = query.to_filter().unwrap();
        assert_eq!(filter.doctor, None);
        assert_eq!(filter.period.start, None);
        assert_eq!(filter.period.end, "2024-02-10".parse().ok());
    }

    #[test]
    fn test_malformed_query_values_are_rejected() {
        let bad_id = LedgerListQuery {
            doctor: Some("not-a-uuid".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad_id.to_filter(), Err(DomainError::Validation(_))));

        let bad_date = LedgerListQuery {
            start_date: Some("2024/01/01".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad_date.to_filter(), Err(DomainError::Validation(_))));
    }
}
