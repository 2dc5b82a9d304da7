//! Publisher seam for integration events.

use async_trait::async_trait;
use thiserror::Error;

use crate::event::IntegrationEvent;

/// Errors that can occur while publishing an event.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The broker could not accept the event.
    #[error("broker unavailable: {0}")]
    Broker(String),

    /// The event could not be serialized for the wire.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Trait for publishing integration events to the message bus.
///
/// Implementations are expected to deliver at most once; callers treat
/// publication as best-effort and must not rely on it for consistency.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes a single event.
    async fn publish(&self, event: IntegrationEvent) -> Result<(), PublishError>;
}
