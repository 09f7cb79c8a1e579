use axum::Json;
use serde::Serialize;
use std::sync::LazyLock;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::error::{ApiErrorBody, ApiErrorResponse};
use crate::handlers::{auth, card, user};
use crate::types::{BatchReport, CardRequest, CardView, JwtResponse, LoginRequest, UserView};

pub const SECURITY_SCHEME_NAME: &str = "bearerAuth";

/// Interactive API browser over [`OPENAPI_DOCUMENT`].
pub const DOCS_UI_PATH: &str = "/docs";

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "UP")]
    pub status: String,
}

/// Multipart form accepted by the batch upload route.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadForm {
    /// Fixed-width TXT batch file.
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthStatus))
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "UP".to_string(),
    })
}

/// GET /v3/api-docs
pub async fn api_docs() -> Json<utoipa::openapi::OpenApi> {
    Json(OPENAPI_DOCUMENT.clone())
}

pub static OPENAPI_DOCUMENT: LazyLock<utoipa::openapi::OpenApi> = LazyLock::new(ApiDoc::openapi);

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Card Vault API",
        description = "Secure card number storage and retrieval. Card numbers are encrypted at rest (AES-256-GCM); every card route requires a JWT obtained from /v1/auth/login."
    ),
    paths(
        auth::login,
        auth::register,
        card::list_cards,
        card::create_card,
        card::upload_cards,
        card::get_card_by_number,
        card::get_card_by_identifier,
        user::list_users,
        user::get_user,
        health,
    ),
    components(schemas(
        LoginRequest,
        JwtResponse,
        UserView,
        CardRequest,
        CardView,
        BatchReport,
        UploadForm,
        HealthStatus,
        ApiErrorResponse,
        ApiErrorBody,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "Authentication", description = "User authentication and registration"),
        (name = "Card Management", description = "Secure card number storage and retrieval"),
        (name = "Users", description = "Registered API users"),
        (name = "Health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            SECURITY_SCHEME_NAME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("JWT token obtained from /v1/auth/login"))
                    .build(),
            ),
        );
    }
}
