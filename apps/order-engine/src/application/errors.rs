//! Application Errors
//!
//! Typed failures of the order lifecycle operations.

use thiserror::Error;

use crate::application::ports::{EnrichmentError, PricingError};
use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::repository::RepositoryError;
use crate::domain::order_lifecycle::value_objects::OrderStatus;

/// Failure of an order lifecycle operation.
///
/// Collaborator errors are wrapped unchanged so callers can tell bad input
/// from a system that could not complete the operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderLifecycleError {
    /// Malformed or incomplete request.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// Offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// Unknown product or insufficient stock.
    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),

    /// Pricing engine failure.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// No order with this id is visible to the caller.
    #[error("Order not found: {order_id}")]
    NotFound {
        /// Order ID.
        order_id: String,
    },

    /// Target status is not a recognized name.
    #[error("Invalid order status: {value}")]
    InvalidStatus {
        /// Rejected value.
        value: String,
    },

    /// The state machine rejects the transition.
    #[error("Invalid status transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
        /// Why it was rejected.
        reason: String,
    },

    /// The caller may not perform this action.
    #[error("User {user_id} is not allowed to {action}")]
    Forbidden {
        /// Caller.
        user_id: String,
        /// Attempted action.
        action: String,
    },

    /// The aggregate rejected its own construction.
    #[error(transparent)]
    Domain(OrderError),

    /// Storage failure, partial write or lost update.
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}

impl OrderLifecycleError {
    /// Build a validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable name of the variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Enrichment(_) => "enrichment",
            Self::Pricing(_) => "pricing",
            Self::NotFound { .. } => "not_found",
            Self::InvalidStatus { .. } => "invalid_status",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::Forbidden { .. } => "forbidden",
            Self::Domain(_) => "domain",
            Self::Persistence(_) => "persistence",
        }
    }

    /// Returns true if the caller's input caused the failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Persistence(_) | Self::Domain(_))
            && !matches!(
                self,
                Self::Enrichment(EnrichmentError::Unavailable { .. })
                    | Self::Pricing(PricingError::Unavailable { .. })
            )
    }
}

impl From<OrderError> for OrderLifecycleError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidStateTransition { from, to, reason } => {
                Self::InvalidTransition { from, to, reason }
            }
            OrderError::InvalidStatus { value } => Self::InvalidStatus { value },
            other => Self::Domain(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_errors_map_to_invalid_transition() {
        let err: OrderLifecycleError = OrderError::InvalidStateTransition {
            from: OrderStatus::Completed,
            to: OrderStatus::Pending,
            reason: "terminal".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            OrderLifecycleError::InvalidTransition {
                from: OrderStatus::Completed,
                to: OrderStatus::Pending,
                ..
            }
        ));
    }

    #[test]
    fn invariant_violations_stay_domain_errors() {
        let err: OrderLifecycleError = OrderError::InvariantViolation {
            invariant: "totalAmount = subtotal + taxes".to_string(),
            state: "1 != 2".to_string(),
        }
        .into();
        assert!(matches!(err, OrderLifecycleError::Domain(_)));
        assert_eq!(err.kind(), "domain");
        assert!(!err.is_client_error());
    }

    #[test]
    fn enrichment_errors_pass_through_unchanged() {
        let source = EnrichmentError::ProductNotFound {
            product_id: "p9".to_string(),
        };
        let err = OrderLifecycleError::from(source.clone());
        assert_eq!(err, OrderLifecycleError::Enrichment(source));
        assert_eq!(err.to_string(), "Product not found: p9");
        assert!(err.is_client_error());
    }
}
