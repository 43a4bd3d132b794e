//! Pricing Calculator Port (Driven Port)
//!
//! Interface to the pricing engine that turns enriched lines into order
//! totals.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::order_lifecycle::value_objects::PricingBreakdown;
use crate::domain::shared::{Money, Quantity};

/// Pricing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A line cannot be priced.
    #[error("Cannot price item {index}: {message}")]
    InvalidLine {
        /// 1-based line index.
        index: usize,
        /// Error message.
        message: String,
    },

    /// The pricing engine could not be reached.
    #[error("Pricing unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
    },
}

/// One line to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingLine {
    /// Units.
    pub quantity: Quantity,
    /// Price per unit.
    pub unit_price: Money,
}

/// Port for computing order totals.
#[async_trait]
pub trait PricingCalculator: Send + Sync {
    /// Compute subtotal, taxes and total for the lines.
    async fn calculate(&self, items: &[PricingLine]) -> Result<PricingBreakdown, PricingError>;
}
