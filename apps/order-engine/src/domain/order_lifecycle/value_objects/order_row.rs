//! Flattened join row as returned by the persistence boundary.

use serde::{Deserialize, Serialize};

use super::{OrderStatus, OrderType};
use crate::domain::shared::{
    CustodianId, CustodyServiceId, OrderId, OrderItemId, ProductId, Timestamp, UserId,
};

/// One `(order, order_item, product, custody_service, custodian)` join tuple.
///
/// An order with N items yields N rows; an order with no items yields a
/// single row whose item columns are all `None`. Numeric columns are carried
/// as text, the way relational drivers return `NUMERIC`/`DECIMAL` values;
/// [`OrderAggregator`](crate::domain::order_lifecycle::services::OrderAggregator)
/// parses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    // order columns
    /// Order id.
    pub order_id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Buy or sell.
    pub order_type: OrderType,
    /// Current status.
    pub status: OrderStatus,
    /// Stored order number, if the store keeps one.
    pub order_number: Option<String>,
    /// Currency code.
    pub currency: Option<String>,
    /// Free-form payment status.
    pub payment_status: Option<String>,
    /// Order creation time.
    pub created_at: Timestamp,
    /// Order last update time.
    pub updated_at: Timestamp,

    // order_item + product columns
    /// Item id; `None` on the sentinel row of an order without items.
    pub item_id: Option<OrderItemId>,
    /// Product id.
    pub product_id: Option<ProductId>,
    /// Product name snapshot.
    pub product_name: Option<String>,
    /// Quantity (text).
    pub quantity: Option<String>,
    /// Unit price (text).
    pub unit_price: Option<String>,
    /// Line total (text).
    pub total_price: Option<String>,
    /// Item creation time.
    pub item_created_at: Option<Timestamp>,

    // custody_service + custodian columns
    /// Custody service foreign key.
    pub custody_service_id: Option<CustodyServiceId>,
    /// Custody service name.
    pub custody_service_name: Option<String>,
    /// Custody fee (text).
    pub custody_fee: Option<String>,
    /// Custody fee currency.
    pub custody_currency: Option<String>,
    /// Custodian id.
    pub custodian_id: Option<CustodianId>,
    /// Custodian name.
    pub custodian_name: Option<String>,
}

impl OrderRow {
    /// Returns true if this row carries an order item.
    #[must_use]
    pub const fn has_item(&self) -> bool {
        self.item_id.is_some()
    }
}
