//! Order entity.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::status::{InternalOrderStatus, OrderStatus};

/// A line item owned by an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product ordered.
    pub product_id: ProductId,
    /// Ordered quantity.
    pub quantity: u32,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// An order materialized from a checkout.
///
/// Created once per successful checkout attempt; after creation only the
/// two status fields change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,

    /// The user who placed the order.
    pub user_id: UserId,

    /// Total price snapshot taken at checkout.
    pub total_price: Money,

    /// Free-text note from the customer.
    pub note: String,

    /// Customer-visible lifecycle status.
    pub status: OrderStatus,

    /// Operational side channel for fulfillment-pipeline failures.
    pub internal_status: InternalOrderStatus,

    /// The ordered lines (cascade lifetime with the order).
    pub items: Vec<OrderItem>,

    /// When the order was created.
    pub created_at: DateTime<Utc>,

    /// When the order was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order in `Created` status with a clean internal status.
    pub fn new(
        user_id: UserId,
        total_price: Money,
        note: impl Into<String>,
        items: Vec<OrderItem>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            user_id,
            total_price,
            note: note.into(),
            status: OrderStatus::Created,
            internal_status: InternalOrderStatus::None,
            items,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the order to a new customer-visible status, refreshing the
    /// modification time.
    ///
    /// Does not validate the transition; callers go through
    /// [`crate::OrderStatusService`].
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Records a fulfillment-pipeline failure on the side channel.
    pub fn set_internal_status(&mut self, status: InternalOrderStatus) {
        self.internal_status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Order {
        Order::new(
            UserId::new(),
            Money::from_cents(2008),
            "leave at the door",
            vec![OrderItem::new("SKU-001", 2), OrderItem::new("SKU-002", 1)],
        )
    }

    #[test]
    fn test_new_order_defaults() {
        let order = sample();
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.internal_status, InternalOrderStatus::None);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_price.cents(), 2008);
    }

    #[test]
    fn test_status_setters_touch_updated_at() {
        let mut order = sample();
        let before = order.updated_at;

        order.set_status(OrderStatus::Paid);
        assert_eq!(order.status, OrderStatus::Paid);
        assert!(order.updated_at >= before);

        order.set_internal_status(InternalOrderStatus::DeliveryFailed);
        assert_eq!(order.internal_status, InternalOrderStatus::DeliveryFailed);
        // The customer-visible status is untouched by the side channel.
        assert_eq!(order.status, OrderStatus::Paid);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let order = sample();
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
