//! Order type (buy or sell).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::DomainError;

/// Whether the customer is buying metal from, or selling metal to, the
/// platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Customer buys bullion.
    Buy,
    /// Customer sells bullion.
    Sell,
}

impl OrderType {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl FromStr for OrderType {
    type Err = DomainError;

    /// Parse case-insensitively ("BUY", "Buy" and "buy" are all `Buy`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("buy") {
            Ok(Self::Buy)
        } else if s.trim().eq_ignore_ascii_case("sell") {
            Ok(Self::Sell)
        } else {
            Err(DomainError::InvalidValue {
                field: "type".to_string(),
                message: format!("order type must be 'buy' or 'sell', got '{s}'"),
            })
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
