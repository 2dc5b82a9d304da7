//! Stock availability check consumed before checkout.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{ProductId, RpcError};

/// Trait for the product service's availability query.
///
/// A pure read: given (product, requested quantity) pairs, returns the
/// products that cannot be supplied. An empty result means everything is
/// available.
#[async_trait]
pub trait StockChecker: Send + Sync {
    /// Returns the unavailable products among the requested lines.
    async fn unavailable(&self, items: &[(ProductId, u32)]) -> Result<Vec<ProductId>, RpcError>;
}

#[derive(Debug, Default)]
struct InMemoryStockState {
    stock: HashMap<ProductId, u32>,
    check_count: u32,
}

/// In-memory stock checker for testing.
///
/// Products without a registered stock level count as unavailable.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockChecker {
    state: Arc<RwLock<InMemoryStockState>>,
}

impl InMemoryStockChecker {
    /// Creates a new in-memory stock checker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the available stock for a product.
    pub fn set_stock(&self, product_id: impl Into<ProductId>, quantity: u32) {
        self.state
            .write()
            .unwrap()
            .stock
            .insert(product_id.into(), quantity);
    }

    /// Returns the number of availability checks performed.
    pub fn check_count(&self) -> u32 {
        self.state.read().unwrap().check_count
    }
}

#[async_trait]
impl StockChecker for InMemoryStockChecker {
    async fn unavailable(&self, items: &[(ProductId, u32)]) -> Result<Vec<ProductId>, RpcError> {
        let mut state = self.state.write().unwrap();
        state.check_count += 1;

        Ok(items
            .iter()
            .filter(|(product_id, requested)| {
                state.stock.get(product_id).copied().unwrap_or(0) < *requested
            })
            .map(|(product_id, _)| product_id.clone())
            .collect())
    }
}
