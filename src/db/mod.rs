//! Database module: pool, migrations, row models and storage.
//!
//! Layout:
//! - `pool.rs`: connection with retry, embedded `sqlx` migrations
//! - `models.rs`: Rust structs mirroring DB rows and conversions
//! - `cards.rs` / `users.rs`: query layer per table

pub mod cards;
pub mod models;
pub mod pool;
pub mod users;

pub use cards::CardStorage;
pub use models::{DbCard, DbUser, NewCard};
pub use pool::{SqlitePool, connect, migrate};
pub use users::UserStorage;
