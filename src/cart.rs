//! Shopping cart ahead of checkout.
//!
//! Prices use decimal arithmetic so subtotals never pick up binary
//! floating-point error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product line in the cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u32,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// In-memory cart. Quantities are always at least 1.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// The storefront's demo cart: two full-size bottles and five travel
    /// sizes.
    pub fn sample() -> Self {
        let mut cart = Self::new();
        cart.add(CartItem {
            id: 1,
            name: "SanitizeSmart Hand Sanitizer".to_string(),
            unit_price: Decimal::new(1299, 2),
            quantity: 2,
        });
        cart.add(CartItem {
            id: 2,
            name: "SanitizeSmart Travel Size".to_string(),
            unit_price: Decimal::new(399, 2),
            quantity: 5,
        });
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line, or bump the quantity of an existing line with the same
    /// id. Lines with a zero quantity are ignored.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    /// Set a line's quantity. Values below 1 and unknown ids are ignored;
    /// use [`Cart::remove`] to drop a line.
    ///
    /// Returns whether the cart changed.
    pub fn set_quantity(&mut self, id: u32, quantity: u32) -> bool {
        if quantity < 1 {
            tracing::debug!(item = id, "ignoring quantity below 1");
            return false;
        }
        match self.items.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a line. Returns the removed line, if it was present.
    pub fn remove(&mut self, id: u32) -> Option<CartItem> {
        let index = self.items.iter().position(|line| line.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units, as shown on the cart badge. Saturates at
    /// `u32::MAX`.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }
}
