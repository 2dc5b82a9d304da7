//! Remote-service seams consumed by the order service.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{Address, CourierId, DeliveryId, Money, OrderId, Recipient, RpcError};
use delivery::DeliveryStatus;

/// Trait for the delivery service as seen from the order service.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    /// Provisions a delivery for an order. May fail (transport error or
    /// rejected request).
    async fn create_delivery(
        &self,
        courier_id: CourierId,
        order_id: OrderId,
        address: Address,
        recipient: Recipient,
    ) -> Result<DeliveryId, RpcError>;

    /// Looks up the status of the delivery provisioned for an order.
    /// Returns None when the delivery service knows no such delivery.
    async fn delivery_status(&self, order_id: OrderId) -> Result<Option<DeliveryStatus>, RpcError>;
}

/// Trait for the payment service as seen from the order service.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens a checkout session for an order total. The gateway may decline
    /// without a URL (Ok(None)) or fail outright (Err).
    async fn create_checkout_session(
        &self,
        order_id: OrderId,
        total: Money,
    ) -> Result<Option<String>, RpcError>;
}

#[derive(Debug, Default)]
struct InMemoryDeliveryClientState {
    created: HashMap<OrderId, DeliveryId>,
    statuses: HashMap<OrderId, DeliveryStatus>,
    fail_on_create: bool,
    create_attempts: u32,
}

/// In-memory delivery client for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeliveryClient {
    state: Arc<RwLock<InMemoryDeliveryClientState>>,
}

impl InMemoryDeliveryClient {
    /// Creates a new in-memory delivery client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the client to fail on the next create calls.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Sets the status the client reports for an order's delivery.
    pub fn set_status(&self, order_id: OrderId, status: DeliveryStatus) {
        self.state.write().unwrap().statuses.insert(order_id, status);
    }

    /// Returns the number of deliveries created.
    pub fn created_count(&self) -> usize {
        self.state.read().unwrap().created.len()
    }

    /// Returns the number of create attempts, including failed ones.
    pub fn create_attempts(&self) -> u32 {
        self.state.read().unwrap().create_attempts
    }
}

#[async_trait]
impl DeliveryClient for InMemoryDeliveryClient {
    async fn create_delivery(
        &self,
        _courier_id: CourierId,
        order_id: OrderId,
        _address: Address,
        _recipient: Recipient,
    ) -> Result<DeliveryId, RpcError> {
        let mut state = self.state.write().unwrap();
        state.create_attempts += 1;

        if state.fail_on_create {
            return Err(RpcError::Rejected("no courier available".to_string()));
        }

        let delivery_id = DeliveryId::new();
        state.created.insert(order_id, delivery_id);
        state.statuses.entry(order_id).or_insert(DeliveryStatus::Pending);
        Ok(delivery_id)
    }

    async fn delivery_status(&self, order_id: OrderId) -> Result<Option<DeliveryStatus>, RpcError> {
        Ok(self.state.read().unwrap().statuses.get(&order_id).copied())
    }
}

#[derive(Debug, Default)]
struct InMemoryPaymentGatewayState {
    fail_on_session: bool,
    absent_on_session: bool,
    fixed_url: Option<String>,
    next_id: u32,
    session_attempts: u32,
    sessions: Vec<(OrderId, Money)>,
}

/// In-memory payment gateway for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryPaymentGatewayState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory payment gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to fail outright on the next session calls.
    pub fn set_fail_on_session(&self, fail: bool) {
        self.state.write().unwrap().fail_on_session = fail;
    }

    /// Configures the gateway to decline without a URL on the next calls.
    pub fn set_absent_on_session(&self, absent: bool) {
        self.state.write().unwrap().absent_on_session = absent;
    }

    /// Pins the URL returned for every session.
    pub fn set_fixed_url(&self, url: impl Into<String>) {
        self.state.write().unwrap().fixed_url = Some(url.into());
    }

    /// Returns the number of session attempts, including failed ones.
    pub fn session_attempts(&self) -> u32 {
        self.state.read().unwrap().session_attempts
    }

    /// Returns the number of sessions successfully opened.
    pub fn session_count(&self) -> usize {
        self.state.read().unwrap().sessions.len()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn create_checkout_session(
        &self,
        order_id: OrderId,
        total: Money,
    ) -> Result<Option<String>, RpcError> {
        let mut state = self.state.write().unwrap();
        state.session_attempts += 1;

        if state.fail_on_session {
            return Err(RpcError::Transport("payment gateway down".to_string()));
        }

        if state.absent_on_session {
            return Ok(None);
        }

        state.next_id += 1;
        let url = state
            .fixed_url
            .clone()
            .unwrap_or_else(|| format!("https://pay/session-{:04}", state.next_id));
        state.sessions.push((order_id, total));
        Ok(Some(url))
    }
}
