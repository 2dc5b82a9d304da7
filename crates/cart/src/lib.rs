//! Cart service core.
//!
//! Owns the checkout orchestration: validate the cart, gate on stock
//! availability, hand the order payload to the order service, and consume
//! the cart the moment an order exists. Insufficient stock is a business
//! outcome reported through a successful [`CheckoutResult`]; the error
//! channel is reserved for structural failures.

mod cart;
mod checkout;
mod fulfillment;
mod stock;
mod store;

pub use cart::{Cart, CartItem};
pub use checkout::{CheckoutError, CheckoutRequest, CheckoutResult, CheckoutService};
pub use fulfillment::{
    FulfillmentClient, FulfillmentReply, InMemoryFulfillmentClient, OrderPayload, PayloadLine,
};
pub use stock::{InMemoryStockChecker, StockChecker};
pub use store::{CartStore, InMemoryCartStore};
