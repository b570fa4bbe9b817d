use axum::Json;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use utoipa::ToSchema;

mod adapters;
mod application;
mod auth;
mod models;
mod routes;

use adapters::PgRecordStore;
use application::{
    DoctorService, HospitalService, ProductionService, SummaryService, TransferService,
};
use auth::ApiCredentials;
use medbill::RecordStore;

/// Type aliases for application services over any record store
pub type AppDoctorService = DoctorService<dyn RecordStore>;
pub type AppHospitalService = HospitalService<dyn RecordStore>;
pub type AppProductionService = ProductionService<dyn RecordStore>;
pub type AppTransferService = TransferService<dyn RecordStore>;
pub type AppSummaryService = SummaryService<dyn RecordStore>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub doctor_service: Arc<AppDoctorService>,
    pub hospital_service: Arc<AppHospitalService>,
    pub production_service: Arc<AppProductionService>,
    pub transfer_service: Arc<AppTransferService>,
    pub summary_service: Arc<AppSummaryService>,
    /// `None` disables authentication
    pub credentials: Option<Arc<ApiCredentials>>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, credentials: Option<ApiCredentials>) -> Self {
        Self {
            doctor_service: Arc::new(DoctorService::new(Arc::clone(&store))),
            hospital_service: Arc::new(HospitalService::new(Arc::clone(&store))),
            production_service: Arc::new(ProductionService::new(Arc::clone(&store))),
            transfer_service: Arc::new(TransferService::new(Arc::clone(&store))),
            summary_service: Arc::new(SummaryService::new(store)),
            credentials: credentials.map(Arc::new),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is running", body = HealthCheck)),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Medbill API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🏥 Medbill API initializing...");

    let credentials = secrets
        .get("MEDBILL_API_KEY")
        .and_then(|key| ApiCredentials::new(key, secrets.get("MEDBILL_API_USER")));
    if credentials.is_some() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No MEDBILL_API_KEY set - authentication disabled");
    }

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {}", e))?;

    tracing::info!("✅ Database migrations completed");

    let store: Arc<dyn RecordStore> = Arc::new(PgRecordStore::new(pool));
    let router = routes::build_router(AppState::new(store, credentials));

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Medbill API ready");

    Ok(router.into())
}
