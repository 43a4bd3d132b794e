//! Order State Machine Service
//!
//! Validates status transitions under a [`TransitionPolicy`].

use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::value_objects::{OrderStatus, TransitionPolicy};

/// Order State Machine for validating transitions.
///
/// Re-applying the current status is always rejected, so a repeated
/// `update_status` call with the same target fails consistently.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderStateMachine {
    policy: TransitionPolicy,
}

impl OrderStateMachine {
    /// Create a state machine for a policy.
    #[must_use]
    pub const fn new(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    /// The policy in force.
    #[must_use]
    pub const fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Parse a target status name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatus` if the name is not a known status.
    pub fn parse_status(value: &str) -> Result<OrderStatus, OrderError> {
        value.parse().map_err(|_| OrderError::InvalidStatus {
            value: value.to_string(),
        })
    }

    /// Check if a status transition is allowed.
    #[must_use]
    pub fn can_transition(&self, from: OrderStatus, to: OrderStatus) -> bool {
        if from == to {
            return false;
        }
        match self.policy {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => Self::strict_next_states(from).contains(&to),
        }
    }

    /// Validate a status transition.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if the transition is not allowed.
    pub fn validate_transition(&self, from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        if self.can_transition(from, to) {
            Ok(())
        } else {
            Err(OrderError::InvalidStateTransition {
                from,
                to,
                reason: self.transition_error_reason(from, to),
            })
        }
    }

    /// Get a human-readable reason for an invalid transition.
    #[must_use]
    pub fn transition_error_reason(&self, from: OrderStatus, to: OrderStatus) -> String {
        if from == to {
            return format!("Order is already {to}");
        }
        match (self.policy, from) {
            (TransitionPolicy::Strict, OrderStatus::Completed) => {
                format!("Order is completed, cannot transition to {to}")
            }
            (TransitionPolicy::Strict, OrderStatus::Cancelled) => {
                format!("Order is cancelled, cannot transition to {to}")
            }
            _ => format!("Invalid transition from {from} to {to}"),
        }
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(&self, from: OrderStatus) -> Vec<OrderStatus> {
        match self.policy {
            TransitionPolicy::Strict => Self::strict_next_states(from).to_vec(),
            TransitionPolicy::Permissive => OrderStatus::ALL
                .into_iter()
                .filter(|status| *status != from)
                .collect(),
        }
    }

    const fn strict_next_states(from: OrderStatus) -> &'static [OrderStatus] {
        match from {
            OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::Processing, OrderStatus::Cancelled],
            OrderStatus::Processing => &[
                OrderStatus::Shipped,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
            ],
            OrderStatus::Shipped => &[OrderStatus::Delivered],
            OrderStatus::Delivered => &[OrderStatus::Completed],
            // Terminal states
            OrderStatus::Completed | OrderStatus::Cancelled => &[],
        }
    }
}
