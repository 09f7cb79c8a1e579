use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;

use crate::error::VaultError;
use crate::router::VaultState;
use crate::service::UploadedFile;

const UPLOAD_FIELD: &str = "file";

/// The `file` part of a multipart upload, read up to the configured
/// `upload.max_size`. Every failure is a 400 `FILE_UPLOAD_ERROR`.
#[derive(Debug)]
pub struct MultipartUpload(pub UploadedFile);

impl FromRequest<VaultState> for MultipartUpload {
    type Rejection = VaultError;

    async fn from_request(req: Request, state: &VaultState) -> Result<Self, Self::Rejection> {
        let max_size = state.batch_parser.max_size();
        let mut multipart = Multipart::from_request(req, state).await.map_err(|rejection| {
            VaultError::FileUpload(format!(
                "Expected a multipart/form-data upload: {}",
                rejection.body_text()
            ))
        })?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, max_size, "Malformed multipart body"))?
        {
            if field.name() == Some(UPLOAD_FIELD) {
                return read_file(field, max_size).await.map(Self);
            }
        }
        Err(VaultError::FileUpload(format!(
            "Missing multipart field '{UPLOAD_FIELD}'"
        )))
    }
}

async fn read_file(mut field: Field<'_>, max_size: u64) -> Result<UploadedFile, VaultError> {
    let file_name = field.file_name().map(str::to_owned);
    let content_type = field.content_type().map(str::to_owned);

    let mut buf = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, max_size, "Failed to read upload"))?
    {
        if (buf.len() + chunk.len()) as u64 > max_size {
            return Err(too_large(max_size));
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(UploadedFile {
        file_name,
        content_type,
        bytes: buf.into(),
    })
}

fn multipart_error(e: MultipartError, max_size: u64, context: &str) -> VaultError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(max_size)
    } else {
        VaultError::FileUpload(format!("{context}: {}", e.body_text()))
    }
}

fn too_large(max_size: u64) -> VaultError {
    VaultError::FileUpload(format!(
        "File size exceeds maximum allowed size ({max_size} bytes)"
    ))
}
