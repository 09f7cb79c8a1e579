pub mod auth;
pub mod card;
pub mod docs;
pub mod user;
