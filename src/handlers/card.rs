use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::error::{ApiErrorResponse, VaultError};
use crate::handlers::docs::UploadForm;
use crate::middleware::{AuthenticatedUser, MultipartUpload, PageParams, PathParam, ValidatedJson};
use crate::router::VaultState;
use crate::types::{BatchReport, CardNumber, CardRequest, CardView, Page, PageQuery};

/// Store a single card number.
#[utoipa::path(
    post,
    path = "/v1/card/create",
    tag = "Card Management",
    request_body = CardRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 201, description = "Card created", body = CardView),
        (status = 400, description = "Invalid card number format", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ApiErrorResponse),
        (status = 409, description = "Card already stored", body = ApiErrorResponse)
    )
)]
pub async fn create_card(
    State(state): State<VaultState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CardRequest>,
) -> Result<(StatusCode, Json<CardView>), VaultError> {
    let number = CardNumber::parse(&request.card_number)?;
    let card = state.cards.create_card(&number).await?;
    info!(%user, identifier = %card.card_number_identifier, "card stored");
    Ok((StatusCode::CREATED, Json(card)))
}

/// Upload a fixed-width TXT batch file in the multipart field `file`.
#[utoipa::path(
    post,
    path = "/v1/card/upload",
    tag = "Card Management",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    security(("bearerAuth" = [])),
    responses(
        (status = 202, description = "File accepted and processed", body = BatchReport),
        (status = 400, description = "Invalid file format or content", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ApiErrorResponse)
    )
)]
pub async fn upload_cards(
    State(state): State<VaultState>,
    AuthenticatedUser(user): AuthenticatedUser,
    MultipartUpload(file): MultipartUpload,
) -> Result<(StatusCode, Json<BatchReport>), VaultError> {
    info!(
        %user,
        file_name = file.file_name.as_deref().unwrap_or("<none>"),
        size = file.bytes.len(),
        "batch upload received"
    );

    let batch = state.batch_parser.parse(&file)?;
    let report = state.cards.create_cards_in_batch(&batch.entries).await?;
    info!(
        %user,
        lot = %batch.header.lot,
        received = report.received,
        stored = report.stored,
        invalid = report.invalid,
        duplicates = report.duplicates,
        "batch upload processed"
    );
    Ok((StatusCode::ACCEPTED, Json(report)))
}

/// List stored cards.
#[utoipa::path(
    get,
    path = "/v1/card",
    tag = "Card Management",
    params(PageQuery),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Cards page", body = Page<CardView>),
        (status = 400, description = "Malformed paging parameters", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ApiErrorResponse)
    )
)]
pub async fn list_cards(
    State(state): State<VaultState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    PageParams(page): PageParams,
) -> Result<Json<Page<CardView>>, VaultError> {
    Ok(Json(state.cards.get_all_cards(page).await?))
}

#[utoipa::path(
    get,
    path = "/v1/card/{card_number}",
    tag = "Card Management",
    params(("card_number" = String, Path, description = "16-digit card number")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Card found", body = CardView),
        (status = 401, description = "Missing or invalid bearer token", body = ApiErrorResponse),
        (status = 404, description = "Card not found", body = ApiErrorResponse)
    )
)]
pub async fn get_card_by_number(
    State(state): State<VaultState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    PathParam(card_number): PathParam<String>,
) -> Result<Json<CardView>, VaultError> {
    Ok(Json(state.cards.get_card_by_number(&card_number).await?))
}

#[utoipa::path(
    get,
    path = "/v1/card/identifier/{identifier}",
    tag = "Card Management",
    params(("identifier" = String, Path, description = "ULID assigned when the card was stored")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Card found", body = CardView),
        (status = 401, description = "Missing or invalid bearer token", body = ApiErrorResponse),
        (status = 404, description = "Card not found", body = ApiErrorResponse)
    )
)]
pub async fn get_card_by_identifier(
    State(state): State<VaultState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    PathParam(identifier): PathParam<String>,
) -> Result<Json<CardView>, VaultError> {
    Ok(Json(state.cards.get_card_by_identifier(&identifier).await?))
}
