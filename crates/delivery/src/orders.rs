//! Order-service lookup consumed when a delivery is canceled.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{OrderId, RpcError, UserId};

/// Trait for resolving order ownership in the order service.
#[async_trait]
pub trait OrderDirectory: Send + Sync {
    /// Returns the user who owns the given order, or None if the order
    /// service does not know it.
    async fn user_id_by_order(&self, order_id: OrderId) -> Result<Option<UserId>, RpcError>;
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    owners: HashMap<OrderId, UserId>,
    fail_on_lookup: bool,
    lookup_count: u32,
}

/// In-memory order directory for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

impl InMemoryOrderDirectory {
    /// Creates a new in-memory order directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an order owner.
    pub fn set_owner(&self, order_id: OrderId, user_id: UserId) {
        self.state.write().unwrap().owners.insert(order_id, user_id);
    }

    /// Configures the directory to fail on the next lookup call.
    pub fn set_fail_on_lookup(&self, fail: bool) {
        self.state.write().unwrap().fail_on_lookup = fail;
    }

    /// Returns the number of lookups performed.
    pub fn lookup_count(&self) -> u32 {
        self.state.read().unwrap().lookup_count
    }
}

#[async_trait]
impl OrderDirectory for InMemoryOrderDirectory {
    async fn user_id_by_order(&self, order_id: OrderId) -> Result<Option<UserId>, RpcError> {
        let mut state = self.state.write().unwrap();
        state.lookup_count += 1;

        if state.fail_on_lookup {
            return Err(RpcError::Transport("order service unreachable".to_string()));
        }

        Ok(state.owners.get(&order_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_hit_and_miss() {
        let directory = InMemoryOrderDirectory::new();
        let order_id = OrderId::new();
        let user_id = UserId::new();
        directory.set_owner(order_id, user_id);

        assert_eq!(
            directory.user_id_by_order(order_id).await.unwrap(),
            Some(user_id)
        );
        assert!(
            directory
                .user_id_by_order(OrderId::new())
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(directory.lookup_count(), 2);
    }

    #[tokio::test]
    async fn test_fail_on_lookup() {
        let directory = InMemoryOrderDirectory::new();
        directory.set_fail_on_lookup(true);

        let result = directory.user_id_by_order(OrderId::new()).await;
        assert!(matches!(result, Err(RpcError::Transport(_))));
    }
}
