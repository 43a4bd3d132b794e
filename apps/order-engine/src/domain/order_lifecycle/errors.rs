//! Order lifecycle errors.

use std::fmt;

use super::value_objects::OrderStatus;
use crate::domain::shared::DomainError;

/// Errors raised by the order aggregate and the status machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Status transition disallowed by the state machine.
    InvalidStateTransition {
        /// Current order status.
        from: OrderStatus,
        /// Attempted status.
        to: OrderStatus,
        /// Reason for failure.
        reason: String,
    },

    /// Target status name is not a recognized status.
    InvalidStatus {
        /// The rejected status name.
        value: String,
    },

    /// Aggregate invariant violated (e.g. totals that do not add up).
    InvariantViolation {
        /// Invariant description.
        invariant: String,
        /// Current state values.
        state: String,
    },

    /// Invalid order parameters.
    InvalidParameters {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStateTransition { from, to, reason } => {
                write!(f, "Invalid order status transition: {from} -> {to}: {reason}")
            }
            Self::InvalidStatus { value } => write!(f, "Invalid order status: '{value}'"),
            Self::InvariantViolation { invariant, state } => {
                write!(f, "Order invariant violation: {invariant} (state: {state})")
            }
            Self::InvalidParameters { field, message } => {
                write!(f, "Invalid order parameter '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for OrderError {}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        Self::InvalidParameters {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
