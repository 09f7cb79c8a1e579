use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::error::{ApiErrorResponse, VaultError};
use crate::middleware::ValidatedJson;
use crate::router::VaultState;
use crate::types::{JwtResponse, LoginRequest, UserView};

/// JWT for a known user with the right password.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = JwtResponse),
        (status = 400, description = "Blank username or password", body = ApiErrorResponse),
        (status = 401, description = "Invalid credentials", body = ApiErrorResponse),
        (status = 404, description = "User not found", body = ApiErrorResponse)
    )
)]
pub async fn login(
    State(state): State<VaultState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<JwtResponse>, VaultError> {
    let user = state
        .users
        .authenticate(&request.username, &request.password)
        .await?;
    let token = state.jwt.issue(&user.username)?;
    info!(username = %user.username, "login succeeded");
    Ok(Json(JwtResponse::bearer(token)))
}

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "User created", body = UserView),
        (status = 400, description = "User already exists or invalid data", body = ApiErrorResponse)
    )
)]
pub async fn register(
    State(state): State<VaultState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<UserView>), VaultError> {
    let created = state
        .users
        .create_user(&request.username, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
