use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};

use crate::error::VaultError;
use crate::router::VaultState;

/// Username carried by a valid `Authorization: Bearer <jwt>` header.
///
/// Adding this extractor to a handler makes the route require authentication;
/// a missing, malformed, expired or forged token is rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl FromRequestParts<VaultState> for AuthenticatedUser {
    type Rejection = VaultError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &VaultState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| VaultError::Unauthorized)?;
        let claims = state.jwt.verify(bearer.token())?;
        Ok(Self(claims.sub))
    }
}
