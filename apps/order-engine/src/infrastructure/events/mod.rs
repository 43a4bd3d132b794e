//! Event Publishing Adapters
//!
//! Implementations of `EventPublisherPort`.

use async_trait::async_trait;

use crate::application::ports::{EventPublishError, EventPublisherPort};
use crate::domain::order_lifecycle::events::OrderEvent;

/// Publishes each domain event as one structured `info` log record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    /// Create a publisher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisherPort for TracingEventPublisher {
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        for event in events {
            let payload = serde_json::to_string(&event).map_err(|e| {
                EventPublishError::SerializationError {
                    message: e.to_string(),
                }
            })?;
            tracing::info!(
                event_type = event.event_type(),
                order_id = %event.order_id(),
                occurred_at = %event.occurred_at(),
                payload = %payload,
                "order event"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_lifecycle::events::OrderStatusChanged;
    use crate::domain::order_lifecycle::value_objects::OrderStatus;
    use crate::domain::shared::{OrderId, Timestamp};

    #[tokio::test]
    async fn publishes_without_error() {
        let events = vec![OrderEvent::StatusChanged(OrderStatusChanged {
            order_id: OrderId::new("o1"),
            from: OrderStatus::Pending,
            to: OrderStatus::Cancelled,
            occurred_at: Timestamp::now(),
        })];

        assert!(TracingEventPublisher::new()
            .publish_order_events(events)
            .await
            .is_ok());
    }
}
