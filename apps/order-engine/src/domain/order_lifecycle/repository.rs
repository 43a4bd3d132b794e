//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders.
//! Implemented by adapters in the infrastructure layer.
//!
//! Reads return flattened [`OrderRow`]s; callers rebuild aggregates with the
//! [`OrderAggregator`](super::services::OrderAggregator).

use async_trait::async_trait;
use thiserror::Error;

use super::aggregate::Order;
use super::value_objects::{OrderRow, OrderStatus, OrderType};
use crate::domain::shared::{OrderId, Timestamp, UserId};

/// Errors raised by order persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The stored status no longer matches the one the caller validated against.
    #[error("Order {order_id} status changed concurrently: expected {expected}, found {actual}")]
    Conflict {
        /// Order ID.
        order_id: String,
        /// Status the caller validated against.
        expected: OrderStatus,
        /// Status actually stored.
        actual: OrderStatus,
    },

    /// Header and items were not written together.
    #[error("Order {order_id} was only partially written")]
    PartialWrite {
        /// Order ID.
        order_id: String,
    },

    /// An order with this id already exists.
    #[error("Order {order_id} already exists")]
    DuplicateOrder {
        /// Order ID.
        order_id: String,
    },

    /// Backend failure.
    #[error("Storage error: {message}")]
    Storage {
        /// Error message.
        message: String,
    },
}

/// Filters for listing orders. All set fields are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Restrict to one user; `None` means all users.
    pub user_id: Option<UserId>,
    /// Restrict to one status.
    pub status: Option<OrderStatus>,
    /// Restrict to buy or sell.
    pub order_type: Option<OrderType>,
}

impl OrderFilter {
    /// Filter for a single user's orders.
    #[must_use]
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// Returns true if a row's order satisfies every set filter.
    #[must_use]
    pub fn matches(&self, user_id: &UserId, status: OrderStatus, order_type: OrderType) -> bool {
        self.user_id.as_ref().is_none_or(|u| u == user_id)
            && self.status.is_none_or(|s| s == status)
            && self.order_type.is_none_or(|t| t == order_type)
    }
}

/// Repository trait for Order persistence.
///
/// This is a domain interface (port) that is implemented by
/// infrastructure adapters (relational store, in-memory, etc.).
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order header and all of its items as one unit.
    ///
    /// Either everything is visible afterwards or nothing is.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateOrder` if the id exists, `Storage` if a referenced
    /// row (such as the custody service) is missing or the backend fails, and
    /// `PartialWrite` if the backend detects an incomplete write.
    async fn save(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Joined rows for one order; empty if the order does not exist.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_joined_rows_by_id(&self, id: &OrderId) -> Result<Vec<OrderRow>, RepositoryError>;

    /// Joined rows for one page of matching orders.
    ///
    /// The `limit`/`offset` window applies to distinct orders, newest first;
    /// rows of one order are ordered by item creation time.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_joined_rows_by_filter(
        &self,
        filter: &OrderFilter,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<OrderRow>, RepositoryError>;

    /// Number of distinct orders matching the filter.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn count_by_filter(&self, filter: &OrderFilter) -> Result<u64, RepositoryError>;

    /// Set a new status only if the stored status is still `expected`.
    ///
    /// Returns `false` if the order does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the stored status differs from `expected`.
    async fn update_status(
        &self,
        id: &OrderId,
        expected: OrderStatus,
        new_status: OrderStatus,
        updated_at: Timestamp,
    ) -> Result<bool, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_matches_everything() {
        let filter = OrderFilter::default();
        assert!(filter.matches(&UserId::new("u1"), OrderStatus::Pending, OrderType::Buy));
        assert!(filter.matches(&UserId::new("u2"), OrderStatus::Shipped, OrderType::Sell));
    }

    #[test]
    fn filters_are_anded() {
        let filter = OrderFilter {
            user_id: Some(UserId::new("u1")),
            status: Some(OrderStatus::Pending),
            order_type: Some(OrderType::Buy),
        };
        assert!(filter.matches(&UserId::new("u1"), OrderStatus::Pending, OrderType::Buy));
        assert!(!filter.matches(&UserId::new("u2"), OrderStatus::Pending, OrderType::Buy));
        assert!(!filter.matches(&UserId::new("u1"), OrderStatus::Confirmed, OrderType::Buy));
        assert!(!filter.matches(&UserId::new("u1"), OrderStatus::Pending, OrderType::Sell));
    }

    #[test]
    fn conflict_message_names_both_statuses() {
        let err = RepositoryError::Conflict {
            order_id: "o1".to_string(),
            expected: OrderStatus::Pending,
            actual: OrderStatus::Cancelled,
        };
        let msg = err.to_string();
        assert!(msg.contains("pending"));
        assert!(msg.contains("cancelled"));
    }
}
