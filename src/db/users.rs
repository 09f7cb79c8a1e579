use chrono::Utc;

use crate::db::models::DbUser;
use crate::db::pool::SqlitePool;
use crate::error::VaultError;
use crate::types::PageRequest;

#[derive(Clone)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// `password_hash` must already be a bcrypt hash.
    pub async fn insert(&self, username: &str, password_hash: &str) -> Result<DbUser, VaultError> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (username, password, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, password, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                VaultError::UserAlreadyExists(username.to_string())
            }
            _ => VaultError::DatabaseError(e),
        })?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<DbUser>, VaultError> {
        let user = sqlx::query_as::<_, DbUser>(
            "SELECT id, username, password, created_at, updated_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn list(&self, page: PageRequest) -> Result<Vec<DbUser>, VaultError> {
        let users = sqlx::query_as::<_, DbUser>(
            "SELECT id, username, password, created_at, updated_at FROM users ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn count(&self) -> Result<i64, VaultError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }
}
