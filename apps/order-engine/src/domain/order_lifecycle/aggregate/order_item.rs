//! Order item (one priced product line of an order).

use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::shared::{Money, OrderItemId, ProductId, Quantity, Timestamp};

/// Parameters for building a new order item from enriched product data.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    /// Product being ordered.
    pub product_id: ProductId,
    /// Product name at order time.
    pub product_name: String,
    /// Units ordered.
    pub quantity: Quantity,
    /// Price per unit.
    pub unit_price: Money,
}

/// A single product line of an order.
///
/// Items are immutable once created. `product_name` is a snapshot taken when
/// the order was placed, not a live catalog reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    id: OrderItemId,
    product_id: ProductId,
    product_name: String,
    quantity: Quantity,
    unit_price: Money,
    total_price: Money,
    created_at: Timestamp,
}

impl OrderItem {
    /// Create a new item; `total_price` is `unit_price * quantity`, rounded
    /// to cents.
    ///
    /// # Errors
    ///
    /// Returns error if the product id is blank, the quantity is zero, the
    /// unit price is negative or the line total overflows.
    pub fn new(params: NewOrderItem, created_at: Timestamp) -> Result<Self, OrderError> {
        if params.product_id.is_blank() {
            return Err(OrderError::InvalidParameters {
                field: "productId".to_string(),
                message: "product id cannot be empty".to_string(),
            });
        }
        params.quantity.validate_for_order()?;
        params.unit_price.validate_non_negative("unitPrice")?;
        let total_price = params
            .unit_price
            .checked_times(params.quantity.units())
            .ok_or_else(|| OrderError::InvalidParameters {
                field: "totalPrice".to_string(),
                message: format!(
                    "{} x {} overflows",
                    params.unit_price,
                    params.quantity.units()
                ),
            })?;

        Ok(Self {
            id: OrderItemId::generate(),
            total_price,
            product_id: params.product_id,
            product_name: params.product_name,
            quantity: params.quantity,
            unit_price: params.unit_price,
            created_at,
        })
    }

    /// Rebuild an item from stored values (no validation).
    #[must_use]
    pub const fn reconstitute(
        id: OrderItemId,
        product_id: ProductId,
        product_name: String,
        quantity: Quantity,
        unit_price: Money,
        total_price: Money,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            product_id,
            product_name,
            quantity,
            unit_price,
            total_price,
            created_at,
        }
    }

    /// Get the item ID.
    #[must_use]
    pub const fn id(&self) -> &OrderItemId {
        &self.id
    }

    /// Get the product ID.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Get the product name snapshot.
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Get the quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the unit price.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Get the line total.
    #[must_use]
    pub const fn total_price(&self) -> Money {
        self.total_price
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn gold_coin(quantity: u32, unit_price: Money) -> NewOrderItem {
        NewOrderItem {
            product_id: ProductId::new("maple-1oz"),
            product_name: "Gold Maple Leaf 1 oz".to_string(),
            quantity: Quantity::new(quantity),
            unit_price,
        }
    }

    #[test]
    fn new_item_computes_total() {
        let item = OrderItem::new(gold_coin(2, Money::from_units(100)), Timestamp::now()).unwrap();

        assert_eq!(item.product_id().as_str(), "maple-1oz");
        assert_eq!(item.quantity(), Quantity::new(2));
        assert_eq!(item.total_price(), Money::from_units(200));
    }

    #[test]
    fn new_item_rounds_total_to_cents() {
        let item =
            OrderItem::new(gold_coin(3, Money::new(dec!(10.005))), Timestamp::now()).unwrap();
        assert_eq!(item.total_price().amount(), dec!(30.02));
    }

    #[test]
    fn new_item_rejects_zero_quantity() {
        let err = OrderItem::new(gold_coin(0, Money::from_units(100)), Timestamp::now())
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidParameters { ref field, .. } if field == "quantity"));
    }

    #[test]
    fn new_item_rejects_negative_price() {
        assert!(OrderItem::new(gold_coin(1, Money::from_units(-1)), Timestamp::now()).is_err());
    }

    #[test]
    fn new_item_rejects_overflowing_total() {
        let unit = Money::new(rust_decimal::Decimal::MAX);
        let err = OrderItem::new(gold_coin(2, unit), Timestamp::now()).unwrap_err();
        assert!(matches!(err, OrderError::InvalidParameters { ref field, .. } if field == "totalPrice"));
    }

    #[test]
    fn new_item_rejects_blank_product() {
        let mut params = gold_coin(1, Money::from_units(1));
        params.product_id = ProductId::new(" ");
        assert!(OrderItem::new(params, Timestamp::now()).is_err());
    }

    #[test]
    fn new_items_get_distinct_ids() {
        let a = OrderItem::new(gold_coin(1, Money::from_units(1)), Timestamp::now()).unwrap();
        let b = OrderItem::new(gold_coin(1, Money::from_units(1)), Timestamp::now()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn order_item_serializes_camel_case() {
        let item = OrderItem::new(gold_coin(2, Money::from_units(100)), Timestamp::now()).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productName"], "Gold Maple Leaf 1 oz");
        assert!(json.get("totalPrice").is_some());
    }
}
