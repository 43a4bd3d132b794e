//! Order Lifecycle Bounded Context
//!
//! Manages bullion orders from creation through fulfilment.
//!
//! # Key Concepts
//!
//! - **Order Aggregate**: header, items and custody snapshot as one unit
//! - **Status Machine**: policy-driven validation of status transitions
//! - **Aggregation**: rebuilding orders from flattened join rows
//! - **Domain Events**: capturing creation and status changes

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{CreateOrderCommand, NewOrderItem, Order, OrderItem};
pub use errors::OrderError;
pub use events::{OrderCreated, OrderEvent, OrderStatusChanged};
pub use repository::{OrderFilter, OrderRepository, RepositoryError};
pub use services::{OrderAggregator, OrderStateMachine};
pub use value_objects::{
    CustodianRef, CustodyServiceRef, OrderNumber, OrderRow, OrderStatus, OrderType, PageRequest,
    Pagination, PricingBreakdown, TransitionPolicy,
};
