//! Authentication primitives: bcrypt password hashing and HS256 JWTs.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtKeys};
pub use password::{hash_password, verify_password};
