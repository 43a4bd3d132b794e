//! Order totals.

use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::aggregate::OrderItem;
use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::shared::Money;

/// Subtotal, taxes and total of an order.
///
/// Invariants: `subtotal == Σ item.total_price` and
/// `total_amount == subtotal + taxes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Taxes (always zero until a tax engine exists).
    pub taxes: Money,
    /// `subtotal + taxes`.
    pub total_amount: Money,
}

impl PricingBreakdown {
    /// Totals recomputed from items, with zero taxes.
    #[must_use]
    pub fn from_items(items: &[OrderItem]) -> Self {
        let subtotal: Money = items.iter().map(OrderItem::total_price).sum();
        Self {
            subtotal,
            taxes: Money::ZERO,
            total_amount: subtotal,
        }
    }

    /// Check these totals are consistent with `items`.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if any amount is negative, the subtotal is
    /// not the sum of line totals, or the total is not subtotal plus taxes.
    pub fn verify(&self, items: &[OrderItem]) -> Result<(), OrderError> {
        for (name, amount) in [
            ("subtotal", self.subtotal),
            ("taxes", self.taxes),
            ("totalAmount", self.total_amount),
        ] {
            if amount.is_negative() {
                return Err(OrderError::InvariantViolation {
                    invariant: format!("{name} >= 0"),
                    state: format!("{name} = {amount}"),
                });
            }
        }

        let item_sum: Money = items.iter().map(OrderItem::total_price).sum();
        if self.subtotal != item_sum {
            return Err(OrderError::InvariantViolation {
                invariant: "subtotal = sum(item.totalPrice)".to_string(),
                state: format!("{} != {item_sum}", self.subtotal),
            });
        }

        if self.total_amount != self.subtotal + self.taxes {
            return Err(OrderError::InvariantViolation {
                invariant: "totalAmount = subtotal + taxes".to_string(),
                state: format!("{} != {} + {}", self.total_amount, self.subtotal, self.taxes),
            });
        }

        Ok(())
    }
}

impl Default for PricingBreakdown {
    fn default() -> Self {
        Self {
            subtotal: Money::ZERO,
            taxes: Money::ZERO,
            total_amount: Money::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_lifecycle::aggregate::NewOrderItem;
    use crate::domain::shared::{ProductId, Quantity, Timestamp};

    fn item(quantity: u32, unit: i64) -> OrderItem {
        OrderItem::new(
            NewOrderItem {
                product_id: ProductId::new("bar-1kg"),
                product_name: "Silver Bar 1 kg".to_string(),
                quantity: Quantity::new(quantity),
                unit_price: Money::from_units(unit),
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn from_items_sums_line_totals() {
        let items = vec![item(2, 100), item(1, 50)];
        let totals = PricingBreakdown::from_items(&items);
        assert_eq!(totals.subtotal, Money::from_units(250));
        assert_eq!(totals.taxes, Money::ZERO);
        assert_eq!(totals.total_amount, Money::from_units(250));
        assert!(totals.verify(&items).is_ok());
    }

    #[test]
    fn from_no_items_is_zero() {
        assert_eq!(PricingBreakdown::from_items(&[]), PricingBreakdown::default());
    }

    #[test]
    fn verify_rejects_wrong_subtotal() {
        let items = vec![item(2, 100)];
        let totals = PricingBreakdown {
            subtotal: Money::from_units(150),
            taxes: Money::ZERO,
            total_amount: Money::from_units(150),
        };
        let err = totals.verify(&items).unwrap_err();
        assert!(err.to_string().contains("subtotal = sum(item.totalPrice)"));
    }

    #[test]
    fn verify_rejects_total_not_matching_taxes() {
        let items = vec![item(2, 100)];
        let totals = PricingBreakdown {
            subtotal: Money::from_units(200),
            taxes: Money::from_units(10),
            total_amount: Money::from_units(200),
        };
        let err = totals.verify(&items).unwrap_err();
        assert!(err.to_string().contains("totalAmount = subtotal + taxes"));
    }

    #[test]
    fn verify_accepts_nonzero_taxes_when_consistent() {
        let items = vec![item(2, 100)];
        let totals = PricingBreakdown {
            subtotal: Money::from_units(200),
            taxes: Money::from_units(16),
            total_amount: Money::from_units(216),
        };
        assert!(totals.verify(&items).is_ok());
    }
}
