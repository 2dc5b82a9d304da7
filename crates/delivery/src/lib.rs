//! Delivery service core.
//!
//! Owns the delivery lifecycle state machine:
//! - `Pending → {InProgress, Canceled}`
//! - `InProgress → {Delivered, Canceled}`
//! - `Delivered` and `Canceled` are terminal.
//!
//! Confirmed deliveries and cancellations publish integration events;
//! cancellation additionally resolves the owning user through the order
//! service so consumers can notify them.

mod courier;
mod delivery;
mod orders;
mod service;
mod status;
mod store;

pub use courier::Courier;
pub use delivery::Delivery;
pub use orders::{InMemoryOrderDirectory, OrderDirectory};
pub use service::{DeliveryService, DeliveryServiceError, DeliveryStatusChange};
pub use status::DeliveryStatus;
pub use store::{DeliveryStore, InMemoryDeliveryStore};
