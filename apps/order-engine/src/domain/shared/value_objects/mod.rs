//! Shared Value Objects
//!
//! Immutable domain types used across the order context.
//! Value objects are compared by value, not identity.

mod currency;
mod identifiers;
mod money;
mod quantity;
mod timestamp;

pub use currency::Currency;
pub use identifiers::{CustodianId, CustodyServiceId, OrderId, OrderItemId, ProductId, UserId};
pub use money::Money;
pub use quantity::Quantity;
pub use timestamp::Timestamp;
