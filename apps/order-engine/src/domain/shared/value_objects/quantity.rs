//! Quantity value object for order line quantities.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// Number of product units on an order line.
///
/// Bullion products are sold in whole units (bars, coins), so a quantity is
/// an integer. A quantity on a new order line must be positive; quantities
/// read back from storage are taken as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Create a new Quantity.
    #[must_use]
    pub const fn new(units: u32) -> Self {
        Self(units)
    }

    /// Zero quantity.
    pub const ZERO: Self = Self(0);

    /// Get the number of units.
    #[must_use]
    pub const fn units(&self) -> u32 {
        self.0
    }

    /// Returns true if this quantity is positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parse a textual quantity, falling back to zero when the text is not a
    /// non-negative integer.
    #[must_use]
    pub fn parse_or_zero(text: Option<&str>) -> Self {
        text.and_then(|t| t.trim().parse::<u32>().ok())
            .map_or(Self::ZERO, Self)
    }

    /// Validate quantity for a new order line.
    ///
    /// # Errors
    ///
    /// Returns error if quantity is zero.
    pub fn validate_for_order(&self) -> Result<(), DomainError> {
        if self.0 == 0 {
            return Err(DomainError::InvalidValue {
                field: "quantity".to_string(),
                message: "quantity must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
