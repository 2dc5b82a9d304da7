//! Order-service fulfillment call consumed by checkout.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{Address, CourierId, DeliveryId, Money, OrderId, ProductId, Recipient, RpcError, UserId};

/// One line of the order payload sent to the order service.
#[derive(Debug, Clone)]
pub struct PayloadLine {
    /// The product ordered.
    pub product_id: ProductId,
    /// Product name snapshot from the cart.
    pub product_name: String,
    /// Ordered quantity.
    pub quantity: u32,
    /// Unit price snapshot from the cart.
    pub unit_price: Money,
}

/// The order/delivery/payment payload built from a cart at checkout.
#[derive(Debug, Clone)]
pub struct OrderPayload {
    /// The user checking out.
    pub user_id: UserId,
    /// Cart total from the stored snapshots.
    pub total_price: Money,
    /// Free-text note from the checkout request.
    pub note: String,
    /// Courier requested for the delivery.
    pub courier_id: CourierId,
    /// Destination address from the checkout request.
    pub address: Address,
    /// Recipient contact from the checkout request.
    pub recipient: Recipient,
    /// The cart lines.
    pub items: Vec<PayloadLine>,
}

/// The order service's reply to a fulfillment call.
///
/// `order_id` is always present; `delivery_id` and `checkout_url` are
/// independently nullable and classified by the checkout orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentReply {
    /// The created order.
    pub order_id: OrderId,
    /// The provisioned delivery, if delivery creation succeeded remotely.
    pub delivery_id: Option<DeliveryId>,
    /// The payment checkout URL, if a session was opened remotely.
    pub checkout_url: Option<String>,
}

/// Trait for the order service's fulfillment RPC.
#[async_trait]
pub trait FulfillmentClient: Send + Sync {
    /// Materializes an order (with delivery and payment session) from the
    /// payload. An `Err` means the call itself failed; business-level
    /// provisioning failures come back as absent fields in the reply.
    async fn create_order_and_delivery(
        &self,
        payload: OrderPayload,
    ) -> Result<FulfillmentReply, RpcError>;
}

#[derive(Debug, Default)]
struct InMemoryFulfillmentState {
    omit_delivery: bool,
    omit_url: bool,
    fail_on_call: bool,
    fixed_url: Option<String>,
    call_count: u32,
    last_payload: Option<OrderPayload>,
}

/// In-memory fulfillment client for testing.
///
/// Fabricates a fresh order id per call; the reply's optional fields are
/// steered by the `omit_*` toggles.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFulfillmentClient {
    state: Arc<RwLock<InMemoryFulfillmentState>>,
}

impl InMemoryFulfillmentClient {
    /// Creates a new in-memory fulfillment client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the reply to carry no delivery id.
    pub fn set_omit_delivery(&self, omit: bool) {
        self.state.write().unwrap().omit_delivery = omit;
    }

    /// Configures the reply to carry no checkout URL.
    pub fn set_omit_url(&self, omit: bool) {
        self.state.write().unwrap().omit_url = omit;
    }

    /// Configures the client to fail the call outright.
    pub fn set_fail_on_call(&self, fail: bool) {
        self.state.write().unwrap().fail_on_call = fail;
    }

    /// Pins the checkout URL returned in replies.
    pub fn set_fixed_url(&self, url: impl Into<String>) {
        self.state.write().unwrap().fixed_url = Some(url.into());
    }

    /// Returns the number of fulfillment calls made.
    pub fn call_count(&self) -> u32 {
        self.state.read().unwrap().call_count
    }

    /// Returns the payload of the most recent call.
    pub fn last_payload(&self) -> Option<OrderPayload> {
        self.state.read().unwrap().last_payload.clone()
    }
}

#[async_trait]
impl FulfillmentClient for InMemoryFulfillmentClient {
    async fn create_order_and_delivery(
        &self,
        payload: OrderPayload,
    ) -> Result<FulfillmentReply, RpcError> {
        let mut state = self.state.write().unwrap();
        state.call_count += 1;

        if state.fail_on_call {
            return Err(RpcError::Transport("order service unreachable".to_string()));
        }

        state.last_payload = Some(payload);

        let delivery_id = (!state.omit_delivery).then(DeliveryId::new);
        let checkout_url = (!state.omit_url).then(|| {
            state
                .fixed_url
                .clone()
                .unwrap_or_else(|| format!("https://pay/session-{:04}", state.call_count))
        });

        Ok(FulfillmentReply {
            order_id: OrderId::new(),
            delivery_id,
            checkout_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> OrderPayload {
        OrderPayload {
            user_id: UserId::new(),
            total_price: Money::from_cents(1000),
            note: String::new(),
            courier_id: CourierId::new(),
            address: Address::new("Springfield", "742 Evergreen Terrace"),
            recipient: Recipient::new("Homer Simpson", "+1-555-0100"),
            items: vec![],
        }
    }

    #[tokio::test]
    async fn test_default_reply_is_complete() {
        let client = InMemoryFulfillmentClient::new();
        let reply = client.create_order_and_delivery(payload()).await.unwrap();

        assert!(reply.delivery_id.is_some());
        assert_eq!(reply.checkout_url.as_deref(), Some("https://pay/session-0001"));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_omit_toggles() {
        let client = InMemoryFulfillmentClient::new();
        client.set_omit_delivery(true);
        client.set_omit_url(true);

        let reply = client.create_order_and_delivery(payload()).await.unwrap();
        assert!(reply.delivery_id.is_none());
        assert!(reply.checkout_url.is_none());
    }

    #[tokio::test]
    async fn test_fail_on_call() {
        let client = InMemoryFulfillmentClient::new();
        client.set_fail_on_call(true);

        let result = client.create_order_and_delivery(payload()).await;
        assert!(matches!(result, Err(RpcError::Transport(_))));
    }
}
