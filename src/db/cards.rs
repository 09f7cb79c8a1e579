use chrono::Utc;

use crate::db::models::{DbCard, NewCard};
use crate::db::pool::SqlitePool;
use crate::error::VaultError;
use crate::types::PageRequest;

const CARD_COLUMNS: &str = "id, card_number, card_number_hash, card_number_identifier, created_at, updated_at";

#[derive(Clone)]
pub struct CardStorage {
    pool: SqlitePool,
}

impl CardStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert one card. A second card with the same digest is `DuplicateCard`.
    pub async fn insert(&self, card: &NewCard) -> Result<DbCard, VaultError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO card (card_number, card_number_hash, card_number_identifier, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {CARD_COLUMNS}"
        );
        sqlx::query_as::<_, DbCard>(&sql)
            .bind(&card.encrypted_number)
            .bind(&card.card_number_hash)
            .bind(&card.card_number_identifier)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)
    }

    /// Insert a batch in one transaction, skipping digests already stored.
    /// Returns how many rows were actually written.
    pub async fn insert_many_skip_existing(&self, cards: &[NewCard]) -> Result<u64, VaultError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for card in cards {
            let result = sqlx::query(
                r#"
                INSERT INTO card (card_number, card_number_hash, card_number_identifier, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT(card_number_hash) DO NOTHING
                "#,
            )
            .bind(&card.encrypted_number)
            .bind(&card.card_number_hash)
            .bind(&card.card_number_identifier)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn find_by_hash(&self, card_number_hash: &str) -> Result<Option<DbCard>, VaultError> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM card WHERE card_number_hash = ?");
        let card = sqlx::query_as::<_, DbCard>(&sql)
            .bind(card_number_hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(card)
    }

    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<DbCard>, VaultError> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM card WHERE card_number_identifier = ?");
        let card = sqlx::query_as::<_, DbCard>(&sql)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?;
        Ok(card)
    }

    pub async fn list(&self, page: PageRequest) -> Result<Vec<DbCard>, VaultError> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM card ORDER BY id LIMIT ? OFFSET ?");
        let cards = sqlx::query_as::<_, DbCard>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(cards)
    }

    pub async fn count(&self) -> Result<i64, VaultError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM card")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }
}

fn map_unique_violation(e: sqlx::Error) -> VaultError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => VaultError::DuplicateCard,
        _ => VaultError::DatabaseError(e),
    }
}
