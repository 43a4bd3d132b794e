//! Currency value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// An ISO 4217-like currency code ("USD", "EUR", "CHF").
///
/// The code is normalized to uppercase on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Create a new Currency.
    ///
    /// The code is trimmed and normalized to uppercase but not validated;
    /// use [`Currency::parse`] for untrusted input.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    /// Parse and validate a currency code.
    ///
    /// # Errors
    ///
    /// Returns error unless the code is exactly three ASCII letters.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        let currency = Self::new(code);
        currency.validate()?;
        Ok(currency)
    }

    /// US dollar.
    #[must_use]
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    /// Get the currency code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the currency code.
    ///
    /// # Errors
    ///
    /// Returns error unless the code is exactly three ASCII letters.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.len() != 3 || !self.0.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidValue {
                field: "currency".to_string(),
                message: format!("'{}' is not a three-letter currency code", self.0),
            });
        }
        Ok(())
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::usd()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
