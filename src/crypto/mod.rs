//! Card number protection at rest.
//!
//! - `cipher.rs`: AES-256-GCM encryption of the stored number
//! - `card_number_digest`: deterministic SHA-256 used as the lookup column

pub mod cipher;

pub use cipher::CardCipher;

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the card number (64 chars).
pub fn card_number_digest(card_number: &str) -> String {
    hex::encode(Sha256::digest(card_number.as_bytes()))
}
