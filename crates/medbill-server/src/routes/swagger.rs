//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::auth::ProfileResponse;
use crate::models::{
    // Doctor models
    CreateDoctorRequest,
    // Hospital models
    CreateHospitalRequest,
    // Production models
    CreateProductionRequest,
    // Transfer models
    CreateTransferRequest,
    DoctorResponse,
    // Summary models
    FinancialSummaryResponse,
    HospitalResponse,
    ProductionResponse,
    TransferResponse,
    UpdateDoctorRequest,
    UpdateHospitalRequest,
    UpdateProductionRequest,
    UpdateTransferRequest,
};
use crate::HealthCheck;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        // Auth endpoints
        crate::auth::get_profile,
        // Doctor endpoints
        super::doctor::list_doctors,
        super::doctor::create_doctor,
        super::doctor::get_doctor,
        super::doctor::update_doctor,
        super::doctor::delete_doctor,
        // Summary endpoints
        super::doctor::get_financial_summary,
        // Hospital endpoints
        super::hospital::list_hospitals,
        super::hospital::create_hospital,
        super::hospital::get_hospital,
        super::hospital::update_hospital,
        super::hospital::delete_hospital,
        // Production endpoints
        super::production::list_productions,
        super::production::create_production,
        super::production::get_production,
        super::production::update_production,
        super::production::delete_production,
        // Transfer endpoints
        super::transfer::list_transfers,
        super::transfer::create_transfer,
        super::transfer::get_transfer,
        super::transfer::update_transfer,
        super::transfer::delete_transfer,
    ),
    info(
        title = "Medbill API",
        version = "0.1.0",
        description = "Medical billing ledger\n\nRecords what each doctor produced at each hospital and what was transferred to them, and reports the outstanding balance.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Auth - API key identity"),
        (name = "Doctor", description = "Doctor - Registry of billing professionals"),
        (name = "Hospital", description = "Hospital - Registry of places of production"),
        (name = "Production", description = "Production - Billable amounts generated by doctors"),
        (name = "Transfer", description = "Transfer - Payments made to doctors"),
        (name = "Summary", description = "Summary - Produced, transferred and outstanding balance"),
    ),
    components(
        schemas(
            HealthCheck,
            ProfileResponse,
            // Doctor
            CreateDoctorRequest,
            UpdateDoctorRequest,
            DoctorResponse,
            // Hospital
            CreateHospitalRequest,
            UpdateHospitalRequest,
            HospitalResponse,
            // Production
            CreateProductionRequest,
            UpdateProductionRequest,
            ProductionResponse,
            // Transfer
            CreateTransferRequest,
            UpdateTransferRequest,
            TransferResponse,
            // Summary
            FinancialSummaryResponse,
        )
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_summary_endpoint() {
        let doc = ApiDoc::openapi();
        assert!(doc
            .paths
            .paths
            .contains_key("/api/doctors/{id}/financial-summary"));
        assert!(doc.paths.paths.contains_key("/api/productions"));
    }
}
