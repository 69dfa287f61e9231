// Centralized error handling for the user directory

use std::fmt;
use thiserror::Error;

/// Errors that can occur while reading or mutating the user directory
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("An account with the username {0} already exists")]
    UsernameAlreadyExists(String),

    #[error("No account with the username {0} exists")]
    UserNotFound(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Card form field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    CardNumber,
    CardHolderName,
    ExpiryDate,
    Cvv,
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardField::CardNumber => "card number",
            CardField::CardHolderName => "card holder name",
            CardField::ExpiryDate => "expiry date",
            CardField::Cvv => "CVV",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Incorrect card data: {field} {reason}")]
pub struct IncorrectCardData {
    pub field: CardField,
    pub reason: &'static str,
}

impl IncorrectCardData {
    pub fn new(field: CardField, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incorrect_card_data_message() {
        let err = IncorrectCardData::new(CardField::Cvv, "must be exactly 3 digits");
        assert_eq!(err.to_string(), "Incorrect card data: CVV must be exactly 3 digits");
    }

    #[test]
    fn test_storage_error_from_anyhow() {
        let err: DirectoryError = anyhow::anyhow!("disk full").into();
        assert!(matches!(err, DirectoryError::Storage(_)));
        assert_eq!(err.to_string(), "Storage error: disk full");
    }
}
