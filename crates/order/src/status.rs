//! Order status machines.

use serde::{Deserialize, Serialize};

/// The customer-visible status of an order.
///
/// State transitions:
/// ```text
/// Created ──┬──► Paid ──┬──► Accepted ──► Shipped ──► Completed
///           │           │
///           │           └──► Rejected
///           └──► Cancelled
/// ```
/// `Completed` additionally requires the delivery service to confirm the
/// delivery arrived; that gate lives in [`crate::OrderStatusService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order exists, payment not yet confirmed.
    #[default]
    Created,

    /// Payment confirmed.
    Paid,

    /// Accepted for fulfillment by the store.
    Accepted,

    /// Handed to the delivery pipeline.
    Shipped,

    /// Delivered and closed (terminal state).
    Completed,

    /// Cancelled by the customer before payment (terminal state).
    Cancelled,

    /// Rejected by the store after payment (terminal state).
    Rejected,
}

impl OrderStatus {
    /// Returns true if the machine allows moving from this status to `target`.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (Created, Paid)
                | (Created, Cancelled)
                | (Paid, Accepted)
                | (Paid, Rejected)
                | (Accepted, Shipped)
                | (Shipped, Completed)
        )
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::Paid => "Paid",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operational side channel, independent of the customer-visible status.
///
/// Records fulfillment-pipeline failures on the order without disturbing
/// its lifecycle. Set at most once, during fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InternalOrderStatus {
    /// No recorded fulfillment problem.
    #[default]
    None,

    /// Delivery provisioning failed during fulfillment.
    DeliveryFailed,
}
