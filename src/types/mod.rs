pub mod card;
pub mod page;
pub mod user;

pub use card::{BatchReport, CardNumber, CardRequest, CardView};
pub use page::{Page, PageQuery, PageRequest};
pub use user::{JwtResponse, LoginRequest, UserView};

use crate::error::VaultError;

/// Field-level checks run by the `ValidatedJson` extractor.
pub trait Validate {
    fn validate(&self) -> Result<(), VaultError>;
}
