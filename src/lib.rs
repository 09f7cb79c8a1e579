#![recursion_limit = "256"]

pub mod auth;
pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod types;

pub use error::VaultError;
pub use router::{VaultState, vault_router};
