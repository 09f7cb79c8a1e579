use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::VaultError;
use crate::types::{PageQuery, PageRequest};

/// `?page=&size=` parsed into a clamped [`PageRequest`].
/// A malformed query is a 400 `VALIDATION_ERROR`.
#[derive(Debug, Clone, Copy)]
pub struct PageParams(pub PageRequest);

impl<S> FromRequestParts<S> for PageParams
where
    S: Send + Sync,
{
    type Rejection = VaultError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| VaultError::Validation(rejection.body_text()))?;
        Ok(Self(query.into()))
    }
}

/// `Path` with its rejection reported through [`VaultError`].
#[derive(Debug)]
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = VaultError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| VaultError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}
