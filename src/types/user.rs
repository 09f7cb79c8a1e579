use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Validate;
use crate::error::VaultError;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    #[schema(format = Password)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), VaultError> {
        if self.username.trim().is_empty() {
            return Err(VaultError::Validation("username must not be blank".to_string()));
        }
        if self.password.trim().is_empty() {
            return Err(VaultError::Validation("password must not be blank".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct UserView {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JwtResponse {
    pub token: String,
    #[serde(rename = "type")]
    #[schema(example = "Bearer")]
    pub token_type: String,
}

impl JwtResponse {
    pub fn bearer(token: String) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
        }
    }
}
