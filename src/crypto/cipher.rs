use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};
use tracing::error;

use crate::error::VaultError;

const NONCE_LEN: usize = 12;

/// AES-256-GCM cipher for card numbers.
///
/// Stored form is `base64(nonce || ciphertext || tag)` with a fresh random
/// 96-bit nonce per call, so the same number never encrypts to the same text.
#[derive(Clone)]
pub struct CardCipher {
    cipher: Aes256Gcm,
}

impl CardCipher {
    /// Derive the 256-bit key as SHA-256 of the passphrase.
    pub fn new(passphrase: &str) -> Self {
        let key = Sha256::digest(passphrase.as_bytes());
        Self {
            cipher: Aes256Gcm::new(&key),
        }
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, VaultError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| {
                error!("Encryption error: {e}");
                VaultError::Crypto("Encryption failed".to_string())
            })?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(STANDARD.encode(out))
    }

    pub fn decrypt(&self, encoded: &str) -> Result<String, VaultError> {
        let raw = STANDARD
            .decode(encoded)
            .map_err(|e| VaultError::Crypto(format!("Decryption failed: {e}")))?;
        if raw.len() < NONCE_LEN {
            return Err(VaultError::Crypto(
                "Decryption failed: input shorter than nonce".to_string(),
            ));
        }

        let (nonce, sealed) = raw.split_at(NONCE_LEN);
        let plain = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| VaultError::Crypto("Decryption failed: authentication tag mismatch".to_string()))?;

        String::from_utf8(plain).map_err(|e| VaultError::Crypto(format!("Decryption failed: {e}")))
    }
}
