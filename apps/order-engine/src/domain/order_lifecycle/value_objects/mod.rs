//! Order Lifecycle Value Objects
//!
//! Immutable types for order management.

mod custody;
mod order_number;
mod order_row;
mod order_status;
mod order_type;
mod pagination;
mod pricing_breakdown;
mod transition_policy;

pub use custody::{CustodianRef, CustodyServiceRef};
pub use order_number::OrderNumber;
pub use order_row::OrderRow;
pub use order_status::OrderStatus;
pub use order_type::OrderType;
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, Pagination};
pub use pricing_breakdown::PricingBreakdown;
pub use transition_policy::TransitionPolicy;
