//! Cart persistence seam and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{StoreError, UserId};

use crate::cart::Cart;

/// Trait for cart persistence. Carts are keyed by their owning user.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Loads the cart for a user, with its items. Returns None if the user
    /// has no cart row.
    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Cart>, StoreError>;

    /// Inserts or replaces a user's cart.
    async fn save(&self, cart: Cart) -> Result<(), StoreError>;

    /// Deletes a user's cart. Deleting a missing cart is not an error.
    async fn delete_by_user(&self, user_id: UserId) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct InMemoryCartState {
    carts: HashMap<UserId, Cart>,
    fail_on_delete: bool,
}

/// In-memory cart store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartStore {
    state: Arc<RwLock<InMemoryCartState>>,
}

impl InMemoryCartStore {
    /// Creates a new in-memory cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail on the next delete call.
    pub fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().unwrap().fail_on_delete = fail;
    }

    /// Returns true if a cart row exists for the user.
    pub fn has_cart(&self, user_id: UserId) -> bool {
        self.state.read().unwrap().carts.contains_key(&user_id)
    }

    /// Returns the number of stored carts.
    pub fn count(&self) -> usize {
        self.state.read().unwrap().carts.len()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Cart>, StoreError> {
        Ok(self.state.read().unwrap().carts.get(&user_id).cloned())
    }

    async fn save(&self, cart: Cart) -> Result<(), StoreError> {
        self.state.write().unwrap().carts.insert(cart.user_id, cart);
        Ok(())
    }

    async fn delete_by_user(&self, user_id: UserId) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_delete {
            return Err(StoreError::Backend("store offline".to_string()));
        }

        state.carts.remove(&user_id);
        Ok(())
    }
}
