//! Delivery state machine.

use serde::{Deserialize, Serialize};

/// The state of a delivery in its lifecycle.
///
/// State transitions:
/// ```text
/// Pending ──┬──► InProgress ──► Delivered
///           │        │
///           └────────┴──► Canceled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryStatus {
    /// Delivery created, courier not yet on the way.
    #[default]
    Pending,

    /// Courier is delivering.
    InProgress,

    /// Package reached the customer (terminal state).
    Delivered,

    /// Delivery was called off (terminal state).
    Canceled,
}

impl DeliveryStatus {
    /// Returns true if the machine allows moving from this status to `target`.
    pub fn can_transition_to(&self, target: DeliveryStatus) -> bool {
        use DeliveryStatus::*;
        matches!(
            (self, target),
            (Pending, InProgress) | (Pending, Canceled) | (InProgress, Delivered) | (InProgress, Canceled)
        )
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Canceled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::InProgress => "InProgress",
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Canceled => "Canceled",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
