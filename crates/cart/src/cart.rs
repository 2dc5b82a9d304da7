//! Cart aggregate.

use chrono::{DateTime, Utc};
use common::{CartId, Money, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// A line in a cart.
///
/// Price and name are snapshots captured when the line was added; checkout
/// does not re-fetch them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product in the cart.
    pub product_id: ProductId,
    /// Requested quantity, always positive.
    pub quantity: u32,
    /// Unit price snapshot taken at add-time.
    pub unit_price: Money,
    /// Product name snapshot taken at add-time.
    pub product_name: String,
}

impl CartItem {
    /// Creates a new cart item.
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
            product_name: product_name.into(),
        }
    }

    /// Returns the total price for this line (quantity * unit price).
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// A user's shopping cart.
///
/// Created lazily on first access; destroyed the moment a checkout attempt
/// produces an order. A cart with zero items is checkout-equivalent to a
/// missing cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,

    /// The owning user. One cart per user.
    pub user_id: UserId,

    /// The cart lines, in insertion order.
    pub items: Vec<CartItem>,

    /// When the cart was created.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart for a user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: CartId::new(),
            user_id,
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a line to the cart.
    ///
    /// If the product is already present, its quantity grows; the stored
    /// price/name snapshots from the first add win.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the cart total from the stored snapshots.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(|item| item.total_price()).sum()
    }

    /// Returns the (product, quantity) pairs for a stock check.
    pub fn line_quantities(&self) -> Vec<(ProductId, u32)> {
        self.items
            .iter()
            .map(|item| (item.product_id.clone(), item.quantity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new(UserId::new());
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Money::zero());
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new(UserId::new());
        cart.add_item(CartItem::new("SKU-001", "Widget", 2, Money::from_cents(999)));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_price().cents(), 1998);
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut cart = Cart::new(UserId::new());
        cart.add_item(CartItem::new("SKU-001", "Widget", 2, Money::from_cents(999)));
        cart.add_item(CartItem::new("SKU-001", "Widget", 3, Money::from_cents(999)));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn test_total_uses_snapshots() {
        let mut cart = Cart::new(UserId::new());
        cart.add_item(CartItem::new("SKU-001", "Widget", 2, Money::from_cents(999)));
        cart.add_item(CartItem::new("SKU-002", "Gadget", 1, Money::from_cents(10)));

        assert_eq!(cart.total_price().cents(), 2008);
    }

    #[test]
    fn test_line_quantities() {
        let mut cart = Cart::new(UserId::new());
        cart.add_item(CartItem::new("SKU-001", "Widget", 2, Money::from_cents(999)));
        cart.add_item(CartItem::new("SKU-002", "Gadget", 1, Money::from_cents(10)));

        let lines = cart.line_quantities();
        assert_eq!(
            lines,
            vec![
                (ProductId::new("SKU-001"), 2),
                (ProductId::new("SKU-002"), 1),
            ]
        );
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut cart = Cart::new(UserId::new());
        cart.add_item(CartItem::new("SKU-001", "Widget", 2, Money::from_cents(999)));

        let json = serde_json::to_string(&cart).unwrap();
        let deserialized: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(cart, deserialized);
    }
}
