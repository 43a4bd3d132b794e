//! Order Aggregate
//!
//! The Order aggregate is the root entity for order lifecycle management;
//! its items are part of the same consistency boundary.

mod order;
mod order_item;

pub use order::{CreateOrderCommand, Order, ReconstitutedOrderParams, DEFAULT_PAYMENT_STATUS};
pub use order_item::{NewOrderItem, OrderItem};
