//! Medbill API Routes
//!
//! - /api/auth/profile - Identity behind the API key
//! - /api/doctors - Doctor registry
//! - /api/doctors/:id/financial-summary - Produced, transferred and balance
//! - /api/hospitals - Hospital registry
//! - /api/productions - Production records
//! - /api/transfers - Transfer records

pub mod doctor;
pub mod hospital;
pub mod production;
pub mod swagger;
pub mod transfer;

use axum::{http::StatusCode, middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, normalize_path::NormalizePath, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use medbill::DomainError;

use crate::{auth, health_check, AppState};

/// Map a domain error onto the HTTP status the API reports
pub fn error_response(err: DomainError) -> (StatusCode, String) {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Repository(_) | DomainError::ExternalService(_) => {
            tracing::error!("Request failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

/// Full application router: docs and health are public, everything under
/// /api goes through the API key check.
///
/// API paths are matched with any trailing slash removed, so `/api/doctors/`
/// and `/api/doctors` are the same route. Swagger UI stays outside the
/// normalization because it redirects `/swagger-ui` to `/swagger-ui/`.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .merge(auth::router())
        .merge(doctor::router())
        .merge(hospital::router())
        .merge(production::router())
        .merge(transfer::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let openapi = swagger::ApiDoc::openapi();

    let api = Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .fallback_service(NormalizePath::trim_trailing_slash(api))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use medbill::InMemoryRecordStore;

    use crate::auth::ApiCredentials;

    fn app(credentials: Option<ApiCredentials>) -> Router {
        let store = Arc::new(InMemoryRecordStore::new());
        build_router(AppState::new(store, credentials))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create(app: &Router, uri: &str, body: Value) -> String {
        let (status, value) = send(app, Method::POST, uri, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "POST {} -> {}", uri, value);
        value["id"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_error_response_statuses() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(
            error_response(DomainError::not_found("Doctor", id)).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(DomainError::validation("bad")).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(DomainError::Conflict("dup".into())).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_response(DomainError::Repository("down".into())).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = app(ApiCredentials::new("secret".into(), None));
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_api_requires_bearer_token_when_configured() {
        let app = app(ApiCredentials::new("secret".into(), Some("carla".into())));

        let (status, _) = send(&app, Method::GET, "/api/doctors", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri("/api/auth/profile")
            .header(header::AUTHORIZATION, "Bearer secret")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let profile: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(profile["username"], "carla");
        assert_eq!(profile["authentication_enabled"], true);

        let request = Request::builder()
            .uri("/api/doctors")
            .header(header::AUTHORIZATION, "Bearer wrong")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_financial_summary_over_http() {
        let app = app(None);
        let doctor = create(
            &app,
            "/api/doctors",
            json!({"name": "Ana Souza", "crm": "CRM-123", "specialty": "Cardiologia"}),
        )
        .await;
        let hospital = create(
            &app,
            "/api/hospitals",
            json!({"name": "Santa Casa", "code": "SC-01"}),
        )
        .await;

        for (amount, date) in [(1000.0, "2024-01-10"), (500.0, "2024-02-05")] {
            create(
                &app,
                "/api/productions",
                json!({"doctor": doctor, "hospital": hospital, "amount": amount, "production_date": date}),
            )
            .await;
        }
        create(
            &app,
            "/api/transfers",
            json!({"doctor": doctor, "hospital": hospital, "amount": 300.0, "transfer_date": "2024-01-20"}),
        )
        .await;

        let uri = format!("/api/doctors/{}/financial-summary", doctor);
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"total_produced": 1500.0, "total_transferred": 300.0, "balance": 1200.0})
        );

        let january = format!("{}?start_date=2024-01-01&end_date=2024-01-31", uri);
        let (_, body) = send(&app, Method::GET, &january, None).await;
        assert_eq!(
            body,
            json!({"total_produced": 1000.0, "total_transferred": 300.0, "balance": 700.0})
        );

        // Empty parameters are ignored
        let empty = format!("{}?start_date=&end_date=", uri);
        let (_, body) = send(&app, Method::GET, &empty, None).await;
        assert_eq!(body["balance"], 1200.0);

        let inverted = format!("{}?start_date=2024-03-01&end_date=2024-01-01", uri);
        let (status, body) = send(&app, Method::GET, &inverted, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"total_produced": 0.0, "total_transferred": 0.0, "balance": 0.0})
        );
    }

    #[tokio::test]
    async fn test_financial_summary_rejects_bad_input() {
        let app = app(None);
        let missing = format!("/api/doctors/{}/financial-summary", uuid::Uuid::new_v4());
        let (status, _) = send(&app, Method::GET, &missing, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let doctor = create(
            &app,
            "/api/doctors",
            json!({"name": "Ana", "crm": "CRM-1", "specialty": "Clínica"}),
        )
        .await;
        let bad_date = format!(
            "/api/doctors/{}/financial-summary?start_date=01/02/2024",
            doctor
        );
        let (status, _) = send(&app, Method::GET, &bad_date, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ledger_crud_and_filters() {
        let app = app(None);
        let doctor = create(
            &app,
            "/api/doctors",
            json!({"name": "Ana", "crm": "CRM-1", "specialty": "Clínica"}),
        )
        .await;
        let hospital = create(&app, "/api/hospitals", json!({"name": "HC", "code": "HC"})).await;

        // Unknown references are rejected
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/productions",
            Some(json!({"doctor": uuid::Uuid::new_v4(), "hospital": hospital, "amount": 10.0, "production_date": "2024-01-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let production = create(
            &app,
            "/api/productions",
            json!({"doctor": doctor, "hospital": hospital, "amount": 250.5, "production_date": "2024-05-02"}),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/api/productions/{}", production),
            Some(json!({"amount": 260.0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["amount"], 260.0);
        assert_eq!(body["production_date"], "2024-05-02");

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/productions?doctor={}&hospital=&start_date=2024-05-01", doctor),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::GET, "/api/productions?doctor=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Deleting the doctor removes its records
        let (status, _) = send(&app, Method::DELETE, &format!("/api/doctors/{}", doctor), None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, body) = send(&app, Method::GET, "/api/productions", None).await;
        assert!(body.as_array().unwrap().is_empty());
        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/productions/{}", production),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_trailing_slash_paths_reach_routes() {
        let app = app(None);
        let doctor = create(
            &app,
            "/api/doctors/",
            json!({"name": "Ana", "crm": "CRM-1", "specialty": "Clínica"}),
        )
        .await;
        let hospital = create(&app, "/api/hospitals/", json!({"name": "HC", "code": "HC"})).await;
        create(
            &app,
            "/api/productions/",
            json!({"doctor": doctor, "hospital": hospital, "amount": 80.0, "production_date": "2024-01-05"}),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/hospitals/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let uri = format!(
            "/api/doctors/{}/financial-summary/?start_date=2024-01-01&end_date=",
            doctor
        );
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_produced"], 80.0);

        let (status, _) = send(&app, Method::GET, "/health/", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, "/api/unknown/", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_hospital_code_conflicts() {
        let app = app(None);
        create(&app, "/api/hospitals", json!({"name": "HC", "code": "HC"})).await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/hospitals",
            Some(json!({"name": "Other", "code": "HC"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
