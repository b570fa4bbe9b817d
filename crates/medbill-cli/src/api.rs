//! Medbill API Client
//!
//! Thin reqwest wrapper over the REST API. It also serves as a
//! `LedgerSource`, so the summary engine can run client-side over records
//! fetched from the server. The two listing requests behind a snapshot are
//! independent; records written in between may show up in only one of them.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use medbill::{
    DateRange, Doctor, DomainError, FinancialSummary, Hospital, LedgerSource, Production,
    RecordFilter, Transfer, ISO_DATE_FORMAT,
};

/// API Client for Medbill
pub struct MedbillClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Request/Response Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    #[serde(default)]
    pub authentication_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub crm: String,
    pub specialty: String,
}

#[derive(Debug, Serialize)]
pub struct CreateHospitalRequest {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CreateProductionRequest {
    pub doctor: Uuid,
    pub hospital: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub production_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct CreateTransferRequest {
    pub doctor: Uuid,
    pub hospital: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub transfer_date: NaiveDate,
}

/// Partial doctor update; absent fields keep their value
#[derive(Debug, Default, Serialize)]
pub struct UpdateDoctorRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct UpdateHospitalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct UpdateProductionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<Uuid>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Serialize)]
pub struct UpdateTransferRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<Uuid>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_date: Option<NaiveDate>,
}

/// Query string for listing and summary endpoints, empty when unfiltered
fn query_string(pairs: &[(&str, Option<String>)]) -> String {
    let parts: Vec<String> = pairs
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|v| format!("{}={}", key, urlencoding::encode(v)))
        })
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}

fn period_pairs(period: &DateRange) -> [(&'static str, Option<String>); 2] {
    [
        (
            "start_date",
            period.start.map(|d| d.format(ISO_DATE_FORMAT).to_string()),
        ),
        (
            "end_date",
            period.end.map(|d| d.format(ISO_DATE_FORMAT).to_string()),
        ),
    ]
}

fn ledger_query(filter: &RecordFilter) -> String {
    let [start, end] = period_pairs(&filter.period);
    query_string(&[
        ("doctor", filter.doctor.map(|id| id.to_string())),
        ("hospital", filter.hospital.map(|id| id.to_string())),
        start,
        end,
    ])
}

impl MedbillClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = self
            .authorized(request)
            .send()
            .await
            .context("Failed to connect to Medbill API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        resp.json().await.context("Failed to parse response")
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "GET");
        self.send(self.client.get(self.url(path))).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!(path, "POST");
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!(path, "PATCH");
        self.send(self.client.patch(self.url(path)).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        tracing::debug!(path, "DELETE");
        let _: serde_json::Value = self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// Identity of the configured API key
    pub async fn profile(&self) -> Result<ProfileResponse> {
        self.get("/api/auth/profile").await
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.get("/api/doctors").await
    }

    pub async fn get_doctor(&self, id: Uuid) -> Result<Doctor> {
        self.get(&format!("/api/doctors/{}", id)).await
    }

    pub async fn create_doctor(&self, request: &CreateDoctorRequest) -> Result<Doctor> {
        self.post("/api/doctors", request).await
    }

    pub async fn update_doctor(&self, id: Uuid, request: &UpdateDoctorRequest) -> Result<Doctor> {
        self.patch(&format!("/api/doctors/{}", id), request).await
    }

    /// Delete a doctor; the server removes its productions and transfers too
    pub async fn delete_doctor(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/doctors/{}", id)).await
    }

    pub async fn list_hospitals(&self) -> Result<Vec<Hospital>> {
        self.get("/api/hospitals").await
    }

    pub async fn create_hospital(&self, request: &CreateHospitalRequest) -> Result<Hospital> {
        self.post("/api/hospitals", request).await
    }

    pub async fn update_hospital(&self, id: Uuid, request: &UpdateHospitalRequest) -> Result<Hospital> {
        self.patch(&format!("/api/hospitals/{}", id), request).await
    }

    pub async fn delete_hospital(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/hospitals/{}", id)).await
    }

    pub async fn list_productions(&self, filter: &RecordFilter) -> Result<Vec<Production>> {
        self.get(&format!("/api/productions{}", ledger_query(filter)))
            .await
    }

    pub async fn create_production(&self, request: &CreateProductionRequest) -> Result<Production> {
        self.post("/api/productions", request).await
    }

    pub async fn update_production(
        &self,
        id: Uuid,
        request: &UpdateProductionRequest,
    ) -> Result<Production> {
        self.patch(&format!("/api/productions/{}", id), request).await
    }

    pub async fn delete_production(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/productions/{}", id)).await
    }

    pub async fn list_transfers(&self, filter: &RecordFilter) -> Result<Vec<Transfer>> {
        self.get(&format!("/api/transfers{}", ledger_query(filter)))
            .await
    }

    pub async fn create_transfer(&self, request: &CreateTransferRequest) -> Result<Transfer> {
        self.post("/api/transfers", request).await
    }

    pub async fn update_transfer(&self, id: Uuid, request: &UpdateTransferRequest) -> Result<Transfer> {
        self.patch(&format!("/api/transfers/{}", id), request).await
    }

    pub async fn delete_transfer(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/transfers/{}", id)).await
    }

    /// Server-side financial summary for a doctor
    pub async fn financial_summary(
        &self,
        doctor_id: Uuid,
        period: &DateRange,
    ) -> Result<FinancialSummary> {
        let query = query_string(&period_pairs(period));
        self.get(&format!("/api/doctors/{}/financial-summary{}", doctor_id, query))
            .await
    }
}

fn external(err: anyhow::Error) -> DomainError {
    DomainError::ExternalService(format!("{:#}", err))
}

#[async_trait]
impl LedgerSource for MedbillClient {
    async fn list_productions(&self, filter: &RecordFilter) -> Result<Vec<Production>, DomainError> {
        MedbillClient::list_productions(self, filter)
            .await
            .map_err(external)
    }

    async fn list_transfers(&self, filter: &RecordFilter) -> Result<Vec<Transfer>, DomainError> {
        MedbillClient::list_transfers(self, filter)
            .await
            .map_err(external)
    }
}
