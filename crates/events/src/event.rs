//! Integration event payloads.

use chrono::{DateTime, Utc};
use common::{OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// A single order line as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLine {
    /// The product the line refers to.
    pub product_id: ProductId,
    /// Ordered quantity.
    pub quantity: u32,
}

impl EventLine {
    /// Creates a new event line.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Events published for consumption by other services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum IntegrationEvent {
    /// An order was created from a checkout.
    OrderCreated(OrderCreatedData),

    /// The order's line items were reserved.
    OrderItemsReserved(OrderItemsReservedData),

    /// The customer-visible order status changed.
    OrderStatusChanged(OrderStatusChangedData),

    /// A delivery reached the customer.
    DeliveryDelivered(DeliveryDeliveredData),

    /// A delivery was canceled before reaching the customer.
    DeliveryCanceled(DeliveryCanceledData),
}

impl IntegrationEvent {
    /// Returns the event type name used for routing.
    pub fn event_type(&self) -> &'static str {
        match self {
            IntegrationEvent::OrderCreated(_) => "OrderCreated",
            IntegrationEvent::OrderItemsReserved(_) => "OrderItemsReserved",
            IntegrationEvent::OrderStatusChanged(_) => "OrderStatusChanged",
            IntegrationEvent::DeliveryDelivered(_) => "DeliveryDelivered",
            IntegrationEvent::DeliveryCanceled(_) => "DeliveryCanceled",
        }
    }
}

/// Data for the OrderCreated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedData {
    /// The created order.
    pub order_id: OrderId,
    /// The user who placed the order.
    pub user_id: UserId,
    /// The ordered lines.
    pub items: Vec<EventLine>,
    /// When the order was created.
    pub occurred_at: DateTime<Utc>,
}

/// Data for the OrderItemsReserved event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemsReservedData {
    /// The order whose lines were reserved.
    pub order_id: OrderId,
    /// The reserved lines.
    pub items: Vec<EventLine>,
    /// When the reservation was recorded.
    pub occurred_at: DateTime<Utc>,
}

/// Data for the OrderStatusChanged event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusChangedData {
    /// The order that changed.
    pub order_id: OrderId,
    /// The status the order moved to.
    pub new_status: String,
    /// When the change was persisted.
    pub occurred_at: DateTime<Utc>,
}

/// Data for the DeliveryDelivered event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryDeliveredData {
    /// The order whose delivery arrived.
    pub order_id: OrderId,
    /// When the delivery was confirmed.
    pub occurred_at: DateTime<Utc>,
}

/// Data for the DeliveryCanceled event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryCanceledData {
    /// The order whose delivery was canceled.
    pub order_id: OrderId,
    /// The owner of the order, resolved so consumers can notify them.
    pub user_id: UserId,
    /// When the cancellation was confirmed.
    pub occurred_at: DateTime<Utc>,
}

// Convenience constructors
impl IntegrationEvent {
    /// Creates an OrderCreated event.
    pub fn order_created(order_id: OrderId, user_id: UserId, items: Vec<EventLine>) -> Self {
        IntegrationEvent::OrderCreated(OrderCreatedData {
            order_id,
            user_id,
            items,
            occurred_at: Utc::now(),
        })
    }

    /// Creates an OrderItemsReserved event.
    pub fn order_items_reserved(order_id: OrderId, items: Vec<EventLine>) -> Self {
        IntegrationEvent::OrderItemsReserved(OrderItemsReservedData {
            order_id,
            items,
            occurred_at: Utc::now(),
        })
    }

    /// Creates an OrderStatusChanged event.
    pub fn order_status_changed(order_id: OrderId, new_status: impl Into<String>) -> Self {
        IntegrationEvent::OrderStatusChanged(OrderStatusChangedData {
            order_id,
            new_status: new_status.into(),
            occurred_at: Utc::now(),
        })
    }

    /// Creates a DeliveryDelivered event.
    pub fn delivery_delivered(order_id: OrderId) -> Self {
        IntegrationEvent::DeliveryDelivered(DeliveryDeliveredData {
            order_id,
            occurred_at: Utc::now(),
        })
    }

    /// Creates a DeliveryCanceled event.
    pub fn delivery_canceled(order_id: OrderId, user_id: UserId) -> Self {
        IntegrationEvent::DeliveryCanceled(DeliveryCanceledData {
            order_id,
            user_id,
            occurred_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        let order_id = OrderId::new();
        let user_id = UserId::new();

        assert_eq!(
            IntegrationEvent::order_created(order_id, user_id, vec![]).event_type(),
            "OrderCreated"
        );
        assert_eq!(
            IntegrationEvent::order_items_reserved(order_id, vec![]).event_type(),
            "OrderItemsReserved"
        );
        assert_eq!(
            IntegrationEvent::order_status_changed(order_id, "Paid").event_type(),
            "OrderStatusChanged"
        );
        assert_eq!(
            IntegrationEvent::delivery_delivered(order_id).event_type(),
            "DeliveryDelivered"
        );
        assert_eq!(
            IntegrationEvent::delivery_canceled(order_id, user_id).event_type(),
            "DeliveryCanceled"
        );
    }

    #[test]
    fn test_serialization_roundtrip() {
        let order_id = OrderId::new();
        let user_id = UserId::new();

        let events = vec![
            IntegrationEvent::order_created(order_id, user_id, vec![EventLine::new("SKU-001", 2)]),
            IntegrationEvent::order_items_reserved(order_id, vec![EventLine::new("SKU-001", 2)]),
            IntegrationEvent::order_status_changed(order_id, "Paid"),
            IntegrationEvent::delivery_delivered(order_id),
            IntegrationEvent::delivery_canceled(order_id, user_id),
        ];

        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let deserialized: IntegrationEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event.event_type(), deserialized.event_type());
        }
    }

    #[test]
    fn test_delivery_canceled_carries_owner() {
        let order_id = OrderId::new();
        let user_id = UserId::new();
        let event = IntegrationEvent::delivery_canceled(order_id, user_id);

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: IntegrationEvent = serde_json::from_str(&json).unwrap();

        if let IntegrationEvent::DeliveryCanceled(data) = deserialized {
            assert_eq!(data.order_id, order_id);
            assert_eq!(data.user_id, user_id);
        } else {
            panic!("Expected DeliveryCanceled event");
        }
    }
}
