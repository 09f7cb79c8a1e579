use chrono::{DateTime, Utc};
use sqlx::FromRow;
use ulid::Ulid;

use crate::crypto::{CardCipher, card_number_digest};
use crate::error::VaultError;
use crate::types::{CardNumber, CardView, UserView};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub username: String,
    /// bcrypt hash, never the raw password.
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbUser> for UserView {
    fn from(u: DbUser) -> Self {
        UserView {
            id: u.id,
            username: u.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbCard {
    pub id: i64,
    /// Encrypted form; see `CardCipher`.
    pub card_number: String,
    pub card_number_hash: String,
    pub card_number_identifier: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbCard {
    pub fn decrypt_number(&self, cipher: &CardCipher) -> Result<String, VaultError> {
        cipher.decrypt(&self.card_number)
    }
}

impl From<DbCard> for CardView {
    fn from(c: DbCard) -> Self {
        CardView {
            id: c.id,
            card_number_identifier: c.card_number_identifier,
        }
    }
}

/// A card ready for insertion: number sealed, digest and ULID assigned.
#[derive(Debug, Clone)]
pub struct NewCard {
    pub encrypted_number: String,
    pub card_number_hash: String,
    pub card_number_identifier: String,
}

impl NewCard {
    pub fn seal(number: &CardNumber, cipher: &CardCipher) -> Result<Self, VaultError> {
        Ok(Self {
            encrypted_number: cipher.encrypt(number.as_str())?,
            card_number_hash: card_number_digest(number.as_str()),
            card_number_identifier: Ulid::new().to_string(),
        })
    }
}
