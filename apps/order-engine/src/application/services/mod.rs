//! Application Services
//!
//! Request validation and the order lifecycle orchestration.

pub mod order_lifecycle;
pub mod order_validator;

pub use order_lifecycle::{OrderLifecycleService, OrderLifecycleSettings};
pub use order_validator::{OrderValidator, PAYMENT_METHOD_TYPES, ValidatedOrderRequest};
