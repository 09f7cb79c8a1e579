use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "cardvault.toml";
/// Environment prefix; nested keys use `__`, e.g. `CARDVAULT_BASIC__LISTEN_ADDR`.
pub const ENV_PREFIX: &str = "CARDVAULT_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub security: SecurityConfig,
    pub encryption: EncryptionConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub loglevel: String,
    pub database_url: String,
    pub db_max_connections: u32,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            loglevel: "info".to_string(),
            database_url: "sqlite://cardvault.db".to_string(),
            db_max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_secs: u64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-jwt-secret".to_string(),
            jwt_expiration_secs: 3600,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncryptionConfig {
    /// Passphrase; the AES-256 key is its SHA-256 digest.
    pub key: String,
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            key: "change-me-encryption-key".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_size: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Defaults, then `cardvault.toml`, then `CARDVAULT_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn uses_default_secrets(&self) -> bool {
        let defaults = Config::default();
        self.security.jwt_secret == defaults.security.jwt_secret
            || self.encryption.key == defaults.encryption.key
    }
}
