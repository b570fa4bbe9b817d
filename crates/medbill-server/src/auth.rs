//! Simple API Key Authentication (Bearer Token)
//!
//! Credentials live in `AppState`; when none are configured every request
//! is let through (development mode).

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;

/// Username reported when no user name is configured
const DEFAULT_USERNAME: &str = "admin";

/// API key and the identity it stands for
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    api_key: String,
    username: String,
}

impl ApiCredentials {
    /// `None` when the key is empty
    pub fn new(api_key: String, username: Option<String>) -> Option<Self> {
        if api_key.trim().is_empty() {
            return None;
        }
        Some(Self {
            api_key,
            username: username
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
        })
    }

    fn accepts(&self, token: &str) -> bool {
        token == self.api_key
    }
}

/// Authentication middleware
/// Validates Bearer token against the API key
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let credentials = match &state.credentials {
        Some(credentials) => credentials,
        None => {
            tracing::warn!("No API key configured, authentication disabled");
            return Ok(next.run(request).await);
        }
    };

    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) if credentials.accepts(token) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid API key attempted");
            Err(StatusCode::UNAUTHORIZED)
        }
        None if auth_header.is_some() => {
            tracing::warn!("Invalid Authorization header format");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::warn!("Missing Authorization header");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Identity behind the accepted API key
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub username: String,
    pub is_superuser: bool,
    pub authentication_enabled: bool,
}

/// Get the profile of the current API key
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Current profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid API key")
    ),
    tag = "Auth"
)]
pub async fn get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    let username = state
        .credentials
        .as_ref()
        .map(|c| c.username.clone())
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

    Json(ProfileResponse {
        username,
        is_superuser: true,
        authentication_enabled: state.credentials.is_some(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/auth/profile", get(get_profile))
}
