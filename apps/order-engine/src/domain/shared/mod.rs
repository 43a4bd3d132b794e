//! Shared Domain Types
//!
//! Value objects and errors shared across the domain layer.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{
    Currency, CustodianId, CustodyServiceId, Money, OrderId, OrderItemId, ProductId, Quantity,
    Timestamp, UserId,
};
