//! Shared types for the order-fulfillment services.
//!
//! Every service crate (cart, order, delivery) speaks in terms of the
//! identifiers, money type and wire value objects defined here, so the
//! cross-service contracts stay type-compatible without the service
//! crates depending on each other's internals.

mod error;
mod ids;
mod money;
mod wire;

pub use error::{RpcError, StoreError};
pub use ids::{CartId, CourierId, DeliveryId, OrderId, ProductId, UserId};
pub use money::Money;
pub use wire::{Address, Recipient};
