//! Human-facing order number.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::OrderId;

/// Display label for an order, e.g. `ORD-3F2A9C1B`.
///
/// Derived from the order id: `ORD-` followed by the first 8 hex characters
/// of the id, upper-cased. It is a label only; lookups always go through the
/// full [`OrderId`], so a truncated-label collision is harmless.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Prefix shared by all order numbers.
    pub const PREFIX: &'static str = "ORD-";

    /// Derive the order number for an order id.
    #[must_use]
    pub fn derive(id: &OrderId) -> Self {
        let hex: String = id
            .as_str()
            .chars()
            .filter(char::is_ascii_hexdigit)
            .take(8)
            .collect();
        Self(format!("{}{}", Self::PREFIX, hex.to_ascii_uppercase()))
    }

    /// Wrap a number that was already stored.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the order number string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
