use axum::{Json, extract::State};

use crate::error::{ApiErrorResponse, VaultError};
use crate::middleware::{AuthenticatedUser, PageParams, PathParam};
use crate::router::VaultState;
use crate::types::{Page, PageQuery, UserView};

#[utoipa::path(
    get,
    path = "/v1/user",
    tag = "Users",
    params(PageQuery),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Users page", body = Page<UserView>),
        (status = 400, description = "Malformed paging parameters", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ApiErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<VaultState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    PageParams(page): PageParams,
) -> Result<Json<Page<UserView>>, VaultError> {
    Ok(Json(state.users.get_all_users(page).await?))
}

#[utoipa::path(
    get,
    path = "/v1/user/{username}",
    tag = "Users",
    params(("username" = String, Path)),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "User found", body = UserView),
        (status = 401, description = "Missing or invalid bearer token", body = ApiErrorResponse),
        (status = 404, description = "User not found", body = ApiErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<VaultState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    PathParam(username): PathParam<String>,
) -> Result<Json<UserView>, VaultError> {
    Ok(Json(state.users.get_user(&username).await?))
}
