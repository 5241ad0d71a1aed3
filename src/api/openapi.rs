//! OpenAPI documentation configuration.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::config::SESSION_TOKEN_HEADER;
use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Salesboard Server",
        version = "0.1.0",
        description = "API server for uploading sales CSVs and viewing dashboard analytics"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Auth endpoints
        api::accounts::signup,
        api::accounts::login,
        api::accounts::logout,
        // Upload endpoints
        api::uploads::upload_csv,
        api::uploads::list_uploads,
        // Dashboard endpoint
        api::dashboard::get_dashboard,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Auth
            api::accounts::SignupRequest,
            api::accounts::LoginRequest,
            api::accounts::LoginResponse,
            models::UserAccount,
            // Uploads
            models::UploadEntry,
            models::UploadPreview,
            api::uploads::UploadListResponse,
            // Dashboard
            models::ChartSeries,
            models::SalesTotals,
            models::DashboardSnapshot,
            models::DashboardData,
            models::DataTable,
        )
    ),
    modifiers(&SessionTokenSecurity),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Signup, login, and logout"),
        (name = "Uploads", description = "CSV upload and history"),
        (name = "Dashboard", description = "Dashboard retrieval")
    )
)]
pub struct ApiDoc;

/// Registers the session-token header as a security scheme.
struct SessionTokenSecurity;

impl Modify for SessionTokenSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(SESSION_TOKEN_HEADER))),
            );
        }
    }
}
