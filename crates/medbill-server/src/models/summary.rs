//! Financial summary DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use medbill::{DateRange, DomainError, FinancialSummary};

/// Optional inclusive date window for a summary
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SummaryParams {
    /// Inclusive lower bound, YYYY-MM-DD
    pub start_date: Option<String>,
    /// Inclusive upper bound, YYYY-MM-DD
    pub end_date: Option<String>,
}

impl SummaryParams {
    pub fn to_range(&self) -> Result<DateRange, DomainError> {
        DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

/// Financial summary response, rounded to cents
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FinancialSummaryResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_produced: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_transferred: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub balance: Decimal,
}

impl From<FinancialSummary> for FinancialSummaryResponse {
    fn from(summary: FinancialSummary) -> Self {
        let rounded = summary.rounded();
        Self {
            total_produced: rounded.total_produced,
            total_transferred: rounded.total_transferred,
            balance: rounded.balance,
        }
    }
}
