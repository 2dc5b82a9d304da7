//! Order service error types.

use common::{RpcError, StoreError};
use thiserror::Error;

/// Errors that can occur during order service operations.
///
/// Business-level fulfillment failures (delivery not created, payment
/// session absent) are NOT errors here; they surface as recorded state and
/// absent fields in [`crate::FulfillmentOutcome`]. Only genuinely
/// unexpected faults travel this channel.
#[derive(Debug, Error)]
pub enum OrderServiceError {
    /// Order persistence failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The delivery-status lookup failed at the transport level.
    #[error("delivery service error: {0}")]
    DeliveryService(#[from] RpcError),
}
