//! Domain events for the order lifecycle.
//!
//! Events record committed state changes so they can be published to
//! interested parties (notifications, audit, analytics).

use serde::{Deserialize, Serialize};

use super::value_objects::{OrderNumber, OrderStatus, OrderType};
use crate::domain::shared::{Currency, Money, OrderId, Timestamp, UserId};

/// All possible order events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    /// Order created.
    Created(OrderCreated),
    /// Order status changed.
    StatusChanged(OrderStatusChanged),
}

impl OrderEvent {
    /// Get the order ID for this event.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        match self {
            Self::Created(e) => &e.order_id,
            Self::StatusChanged(e) => &e.order_id,
        }
    }

    /// Get the timestamp when this event occurred.
    #[must_use]
    pub const fn occurred_at(&self) -> Timestamp {
        match self {
            Self::Created(e) => e.occurred_at,
            Self::StatusChanged(e) => e.occurred_at,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Created(_) => "ORDER_CREATED",
            Self::StatusChanged(_) => "ORDER_STATUS_CHANGED",
        }
    }
}

/// Event: order created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    /// Order ID.
    pub order_id: OrderId,
    /// Display number.
    pub order_number: OrderNumber,
    /// Owning user.
    pub user_id: UserId,
    /// Buy or sell.
    pub order_type: OrderType,
    /// Number of items.
    pub item_count: usize,
    /// Order total.
    pub total_amount: Money,
    /// Order currency.
    pub currency: Currency,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: order status changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChanged {
    /// Order ID.
    pub order_id: OrderId,
    /// Previous status.
    pub from: OrderStatus,
    /// New status.
    pub to: OrderStatus,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}
