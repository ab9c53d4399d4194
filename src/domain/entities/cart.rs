//! In-memory shopping cart.

use std::collections::BTreeMap;

use super::ProductId;

/// Quantities of products added during this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: BTreeMap<ProductId, u32>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `id`, returning the new quantity for that product.
    pub fn add(&mut self, id: ProductId) -> u32 {
        let quantity = self.lines.entry(id).or_insert(0);
        *quantity = quantity.saturating_add(1);
        *quantity
    }

    /// Quantity of `id` in the cart.
    #[must_use]
    pub fn quantity(&self, id: ProductId) -> u32 {
        self.lines.get(&id).copied().unwrap_or(0)
    }

    /// Total number of units across all products.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.values().copied().fold(0, u32::saturating_add)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates_quantity() {
        let mut cart = Cart::new();
        assert!(cart.is_empty());

        assert_eq!(cart.add(ProductId(1)), 1);
        assert_eq!(cart.add(ProductId(1)), 2);
        assert_eq!(cart.add(ProductId(7)), 1);

        assert_eq!(cart.quantity(ProductId(1)), 2);
        assert_eq!(cart.quantity(ProductId(2)), 0);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(ProductId(4));
        cart.clear();
        assert_eq!(cart.total_items(), 0);
    }
}
