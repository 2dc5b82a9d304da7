//! Delivery persistence seam and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{DeliveryId, OrderId, StoreError};

use crate::delivery::Delivery;

/// Trait for delivery persistence.
#[async_trait]
pub trait DeliveryStore: Send + Sync {
    /// Loads a delivery by ID. Returns None if it does not exist.
    async fn get(&self, delivery_id: DeliveryId) -> Result<Option<Delivery>, StoreError>;

    /// Loads the delivery provisioned for an order, if any.
    async fn find_by_order(&self, order_id: OrderId) -> Result<Option<Delivery>, StoreError>;

    /// Inserts or replaces a delivery.
    async fn save(&self, delivery: Delivery) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct InMemoryDeliveryState {
    deliveries: HashMap<DeliveryId, Delivery>,
    fail_on_save: bool,
}

/// In-memory delivery store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeliveryStore {
    state: Arc<RwLock<InMemoryDeliveryState>>,
}

impl InMemoryDeliveryStore {
    /// Creates a new in-memory delivery store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail on the next save call.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.state.write().unwrap().fail_on_save = fail;
    }

    /// Returns the number of stored deliveries.
    pub fn count(&self) -> usize {
        self.state.read().unwrap().deliveries.len()
    }
}

#[async_trait]
impl DeliveryStore for InMemoryDeliveryStore {
    async fn get(&self, delivery_id: DeliveryId) -> Result<Option<Delivery>, StoreError> {
        Ok(self.state.read().unwrap().deliveries.get(&delivery_id).cloned())
    }

    async fn find_by_order(&self, order_id: OrderId) -> Result<Option<Delivery>, StoreError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .deliveries
            .values()
            .find(|d| d.order_id == order_id)
            .cloned())
    }

    async fn save(&self, delivery: Delivery) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_save {
            return Err(StoreError::Backend("store offline".to_string()));
        }

        state.deliveries.insert(delivery.id, delivery);
        Ok(())
    }
}
