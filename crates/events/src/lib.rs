//! Integration events published by the fulfillment services.
//!
//! These are messages consumed by collaborators outside the orchestration
//! core; the publisher never reads them back. Publication is best-effort
//! and fire-and-forget: it happens after the local write commits, with no
//! outbox or two-phase coordination, so a crash between the write and the
//! publish can lose an event without losing the state change.

mod event;
mod memory;
mod publisher;

pub use event::{
    DeliveryCanceledData, DeliveryDeliveredData, EventLine, IntegrationEvent, OrderCreatedData,
    OrderItemsReservedData, OrderStatusChangedData,
};
pub use memory::InMemoryEventBus;
pub use publisher::{EventPublisher, PublishError};
