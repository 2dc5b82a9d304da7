//! Delivery entity.

use chrono::{DateTime, Utc};
use common::{Address, CourierId, DeliveryId, OrderId, Recipient};
use serde::{Deserialize, Serialize};

use crate::status::DeliveryStatus;

/// A delivery provisioned for exactly one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Unique delivery identifier.
    pub id: DeliveryId,

    /// The order this delivery fulfills. One delivery per order.
    pub order_id: OrderId,

    /// The courier assigned to carry it.
    pub courier_id: CourierId,

    /// Current lifecycle status.
    pub status: DeliveryStatus,

    /// Destination address.
    pub address: Address,

    /// Who receives the package.
    pub recipient: Recipient,

    /// Carrier tracking number, if one has been assigned.
    pub tracking_number: Option<String>,

    /// When the delivery was created.
    pub created_at: DateTime<Utc>,

    /// When the delivery was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    /// Creates a new pending delivery for an order.
    pub fn new(
        order_id: OrderId,
        courier_id: CourierId,
        address: Address,
        recipient: Recipient,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: DeliveryId::new(),
            order_id,
            courier_id,
            status: DeliveryStatus::Pending,
            address,
            recipient,
            tracking_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Assigns a tracking number.
    pub fn with_tracking_number(mut self, tracking_number: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking_number.into());
        self
    }

    /// Moves the delivery to a new status, refreshing the modification time.
    ///
    /// Does not validate the transition; callers go through the status
    /// machine in [`crate::DeliveryService`].
    pub fn set_status(&mut self, status: DeliveryStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Delivery {
        Delivery::new(
            OrderId::new(),
            CourierId::new(),
            Address::new("Springfield", "742 Evergreen Terrace"),
            Recipient::new("Homer Simpson", "+1-555-0100"),
        )
    }

    #[test]
    fn test_new_delivery_is_pending() {
        let delivery = sample();
        assert_eq!(delivery.status, DeliveryStatus::Pending);
        assert!(delivery.tracking_number.is_none());
    }

    #[test]
    fn test_with_tracking_number() {
        let delivery = sample().with_tracking_number("TRACK-42");
        assert_eq!(delivery.tracking_number.as_deref(), Some("TRACK-42"));
    }

    #[test]
    fn test_set_status_touches_updated_at() {
        let mut delivery = sample();
        let before = delivery.updated_at;
        delivery.set_status(DeliveryStatus::InProgress);
        assert_eq!(delivery.status, DeliveryStatus::InProgress);
        assert!(delivery.updated_at >= before);
    }
}
