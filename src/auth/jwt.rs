use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VaultError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing and verification keys plus the token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
}

impl JwtKeys {
    /// Fails when `ttl_secs` does not fit a timestamp offset.
    pub fn new(secret: &str, ttl_secs: u64) -> Result<Self, VaultError> {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| {
                VaultError::Config(format!(
                    "security.jwt_expiration_secs out of range: {ttl_secs}"
                ))
            })?;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn issue(&self, username: &str) -> Result<String, VaultError> {
        let now = Utc::now();
        let exp = now.checked_add_signed(self.ttl).ok_or_else(|| {
            VaultError::Config("token expiry overflows the timestamp range".to_string())
        })?;
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Any decoding failure (bad signature, expired, malformed) is `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, VaultError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "rejected bearer token");
                VaultError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_subject() {
        let keys = JwtKeys::new("secret", 60).unwrap();
        let token = keys.issue("testuser").unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "testuser");
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtKeys::new("secret", 60).unwrap().issue("testuser").unwrap();
        let err = JwtKeys::new("other", 60).unwrap().verify(&token).unwrap_err();
        assert!(matches!(err, VaultError::Unauthorized));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::new("secret", 60).unwrap();
        let now = Utc::now().timestamp();
        let stale = Claims {
            sub: "testuser".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &stale,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert!(matches!(keys.verify(&token), Err(VaultError::Unauthorized)));
    }

    #[test]
    fn out_of_range_lifetime_is_a_config_error() {
        for ttl in [u64::MAX, i64::MAX as u64, 1 << 62] {
            let err = JwtKeys::new("secret", ttl).err().unwrap();
            assert!(matches!(err, VaultError::Config(_)), "{ttl}");
        }
        assert!(JwtKeys::new("secret", 10 * 365 * 24 * 3600).is_ok());
    }

    #[test]
    fn garbage_is_rejected() {
        let keys = JwtKeys::new("secret", 60).unwrap();
        assert!(keys.verify("not.a.jwt").is_err());
    }
}
