//! Order persistence seam and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{OrderId, StoreError};

use crate::order::Order;

/// Trait for order persistence.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Loads an order (with its items) by ID. Returns None if it does not exist.
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>, StoreError>;

    /// Inserts or replaces an order.
    async fn save(&self, order: Order) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, Order>,
    fail_on_save: bool,
}

/// In-memory order store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderStore {
    /// Creates a new in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail on the next save call.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.state.write().unwrap().fail_on_save = fail;
    }

    /// Returns the number of stored orders.
    pub fn count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.state.read().unwrap().orders.get(&order_id).cloned())
    }

    async fn save(&self, order: Order) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_save {
            return Err(StoreError::Backend("store offline".to_string()));
        }

        state.orders.insert(order.id, order);
        Ok(())
    }
}
