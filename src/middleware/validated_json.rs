use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::VaultError;
use crate::types::Validate;

/// JSON body that is deserialized and then checked with [`Validate`].
/// Both failures are reported as 400 `VALIDATION_ERROR`.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = VaultError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| VaultError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}
