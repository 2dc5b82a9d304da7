//! In-memory event bus for testing.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::event::IntegrationEvent;
use crate::publisher::{EventPublisher, PublishError};

#[derive(Debug, Default)]
struct InMemoryBusState {
    published: Vec<IntegrationEvent>,
    fail_on_publish: bool,
}

/// In-memory event bus that records everything published through it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventBus {
    state: Arc<RwLock<InMemoryBusState>>,
}

impl InMemoryEventBus {
    /// Creates a new in-memory event bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the bus to reject the next publish calls.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.state.write().unwrap().fail_on_publish = fail;
    }

    /// Returns all events published so far, in publication order.
    pub fn published(&self) -> Vec<IntegrationEvent> {
        self.state.read().unwrap().published.clone()
    }

    /// Returns the number of published events with the given type name.
    pub fn count_of(&self, event_type: &str) -> usize {
        self.state
            .read()
            .unwrap()
            .published
            .iter()
            .filter(|e| e.event_type() == event_type)
            .count()
    }

    /// Returns the total number of published events.
    pub fn total(&self) -> usize {
        self.state.read().unwrap().published.len()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: IntegrationEvent) -> Result<(), PublishError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_publish {
            return Err(PublishError::Broker("bus offline".to_string()));
        }

        state.published.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{OrderId, UserId};

    #[tokio::test]
    async fn test_publish_records_events() {
        let bus = InMemoryEventBus::new();
        let order_id = OrderId::new();

        bus.publish(IntegrationEvent::delivery_delivered(order_id))
            .await
            .unwrap();
        bus.publish(IntegrationEvent::order_status_changed(order_id, "Paid"))
            .await
            .unwrap();

        assert_eq!(bus.total(), 2);
        assert_eq!(bus.count_of("DeliveryDelivered"), 1);
        assert_eq!(bus.count_of("OrderStatusChanged"), 1);
        assert_eq!(bus.count_of("DeliveryCanceled"), 0);
    }

    #[tokio::test]
    async fn test_fail_on_publish() {
        let bus = InMemoryEventBus::new();
        bus.set_fail_on_publish(true);

        let result = bus
            .publish(IntegrationEvent::delivery_canceled(
                OrderId::new(),
                UserId::new(),
            ))
            .await;

        assert!(matches!(result, Err(PublishError::Broker(_))));
        assert_eq!(bus.total(), 0);
    }
}
