//! Order service core.
//!
//! Two responsibilities live here:
//! - the [`FulfillmentCoordinator`], which materializes an order from a
//!   checkout payload, publishes the creation events, and provisions the
//!   delivery and payment session with recorded (not propagated) failures;
//! - the [`OrderStatusService`], the customer-visible order status machine,
//!   including its one cross-service gate: an order cannot complete until
//!   the delivery service confirms the delivery arrived.

mod clients;
mod error;
mod fulfillment;
mod order;
mod service;
mod status;
mod store;

pub use clients::{
    DeliveryClient, InMemoryDeliveryClient, InMemoryPaymentGateway, PaymentGateway,
};
pub use error::OrderServiceError;
pub use fulfillment::{FulfillmentCoordinator, FulfillmentOutcome, FulfillmentRequest, OrderLine};
pub use order::{Order, OrderItem};
pub use service::{OrderStatusChange, OrderStatusService};
pub use status::{InternalOrderStatus, OrderStatus};
pub use store::{InMemoryOrderStore, OrderStore};
