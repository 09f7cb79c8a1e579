use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use utoipa_scalar::{Scalar, Servable};

use crate::auth::JwtKeys;
use crate::config::Config;
use crate::crypto::CardCipher;
use crate::db::{CardStorage, SqlitePool, UserStorage};
use crate::error::VaultError;
use crate::handlers::{auth, card, docs, user};
use crate::middleware::log_requests;
use crate::service::{BatchFileParser, CardService, UserService, ingest_actor};

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct VaultState {
    pub cards: CardService,
    pub users: UserService,
    pub jwt: JwtKeys,
    pub batch_parser: BatchFileParser,
}

impl VaultState {
    pub fn new(
        cards: CardService,
        users: UserService,
        jwt: JwtKeys,
        batch_parser: BatchFileParser,
    ) -> Self {
        Self {
            cards,
            users,
            jwt,
            batch_parser,
        }
    }

    /// Wire storage, crypto and the ingest actor from a migrated pool.
    pub async fn build(pool: SqlitePool, cfg: &Config) -> Result<Self, VaultError> {
        let card_storage = CardStorage::new(pool.clone());
        let ingest = ingest_actor::spawn(card_storage.clone()).await?;
        let cards = CardService::new(card_storage, CardCipher::new(&cfg.encryption.key), ingest);
        let users = UserService::new(UserStorage::new(pool), cfg.security.bcrypt_cost);
        let jwt = JwtKeys::new(&cfg.security.jwt_secret, cfg.security.jwt_expiration_secs)?;
        Ok(Self::new(
            cards,
            users,
            jwt,
            BatchFileParser::new(cfg.upload.max_size),
        ))
    }
}

pub fn vault_router(state: VaultState) -> Router {
    let upload_limit = usize::try_from(state.batch_parser.max_size())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/health", get(docs::health))
        .route("/v3/api-docs", get(docs::api_docs))
        .route("/v1/auth/login", post(auth::login))
        .route("/v1/auth/register", post(auth::register))
        .route("/v1/card", get(card::list_cards))
        .route("/v1/card/create", post(card::create_card))
        .route(
            "/v1/card/upload",
            post(card::upload_cards).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/v1/card/identifier/{identifier}",
            get(card::get_card_by_identifier),
        )
        .route("/v1/card/{card_number}", get(card::get_card_by_number))
        .route("/v1/user", get(user::list_users))
        .route("/v1/user/{username}", get(user::get_user))
        .merge(Scalar::with_url(
            docs::DOCS_UI_PATH,
            docs::OPENAPI_DOCUMENT.clone(),
        ))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}
