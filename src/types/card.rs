use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Validate;
use crate::error::VaultError;

/// A card number that is exactly 16 ASCII digits.
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber(String);

impl CardNumber {
    pub const LEN: usize = 16;

    pub fn parse(raw: &str) -> Result<Self, VaultError> {
        if raw.trim().is_empty() {
            return Err(VaultError::Validation(
                "Card number cannot be blank".to_string(),
            ));
        }
        if !Self::is_valid(raw) {
            return Err(VaultError::Validation(
                "Card number must be exactly 16 digits".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn is_valid(raw: &str) -> bool {
        raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the full number.
impl std::fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardNumber(****{})", &self.0[Self::LEN - 4..])
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    #[serde(default)]
    #[schema(pattern = "^[0-9]{16}$", example = "4456897922969999")]
    pub card_number: String,
}

impl Validate for CardRequest {
    fn validate(&self) -> Result<(), VaultError> {
        CardNumber::parse(&self.card_number).map(|_| ())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: i64,
    #[schema(max_length = 26)]
    pub card_number_identifier: String,
}

/// Outcome of a batch upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Card entries read from the file.
    pub received: usize,
    pub stored: usize,
    /// Entries that are not 16 digits.
    pub invalid: usize,
    /// Valid entries already present (or repeated within the file).
    pub duplicates: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_sixteen_digits() {
        let n = CardNumber::parse("1234567890123456").unwrap();
        assert_eq!(n.as_str(), "1234567890123456");
        assert_eq!(format!("{n:?}"), "CardNumber(****3456)");
    }

    #[test]
    fn rejects_wrong_length_blank_and_non_digits() {
        assert!(CardNumber::parse("123").is_err());
        assert!(CardNumber::parse("12345678901234567").is_err());
        assert!(CardNumber::parse("   ").is_err());
        assert!(CardNumber::parse("1234-67890123456").is_err());
        assert!(!CardNumber::is_valid("123456789012345a"));
    }
}
