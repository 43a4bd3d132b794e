//! Pricing Adapters
//!
//! Implementations of `PricingCalculator`.

use async_trait::async_trait;

use crate::application::ports::{PricingCalculator, PricingError, PricingLine};
use crate::domain::order_lifecycle::value_objects::PricingBreakdown;
use crate::domain::shared::Money;

/// Sums line totals; taxes are always zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatPricingCalculator;

impl FlatPricingCalculator {
    /// Create a calculator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PricingCalculator for FlatPricingCalculator {
    async fn calculate(&self, items: &[PricingLine]) -> Result<PricingBreakdown, PricingError> {
        let mut subtotal = Money::ZERO;
        for (index, line) in items.iter().enumerate() {
            if line.unit_price.is_negative() {
                return Err(PricingError::InvalidLine {
                    index: index + 1,
                    message: format!("negative unit price {}", line.unit_price),
                });
            }
            subtotal = subtotal + line.unit_price.times(line.quantity.units());
        }

        Ok(PricingBreakdown {
            subtotal,
            taxes: Money::ZERO,
            total_amount: subtotal,
        })
    }
}
