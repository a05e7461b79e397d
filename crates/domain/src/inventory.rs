//! Access to live products for stock checks and stock mutation.

use std::collections::{BTreeMap, HashMap};

use common::ProductId;

use crate::product::Product;

/// Source of live products handed to cart and order operations.
///
/// Carts and orders reference products by id only. A product missing from
/// the inventory is treated as "not attached": stock checks for it are
/// skipped and its stock is left untouched.
pub trait Inventory {
    /// Returns the live product, if attached.
    fn product(&self, id: ProductId) -> Option<&Product>;

    /// Returns the live product for mutation, if attached.
    fn product_mut(&mut self, id: ProductId) -> Option<&mut Product>;
}

impl Inventory for HashMap<ProductId, Product> {
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.get(&id)
    }

    fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.get_mut(&id)
    }
}

impl Inventory for BTreeMap<ProductId, Product> {
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.get(&id)
    }

    fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.get_mut(&id)
    }
}

/// An inventory with nothing attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl Inventory for Detached {
    fn product(&self, _id: ProductId) -> Option<&Product> {
        None
    }

    fn product_mut(&mut self, _id: ProductId) -> Option<&mut Product> {
        None
    }
}

/// Builds an inventory keyed by product id.
pub fn inventory_of(products: impl IntoIterator<Item = Product>) -> HashMap<ProductId, Product> {
    products.into_iter().map(|p| (p.id(), p)).collect()
}

#[cfg(test)]
mod tests {
    use common::Money;

    use super::*;

    #[test]
    fn test_inventory_lookup_by_id() {
        let product = Product::new(ProductId::new(9), "Lamp", Money::from_cents(500), 2).unwrap();
        let mut inventory = inventory_of([product]);

        assert!(inventory.product(ProductId::new(9)).is_some());
        assert!(inventory.product(ProductId::new(10)).is_none());

        inventory
            .product_mut(ProductId::new(9))
            .unwrap()
            .decrease_stock(1)
            .unwrap();
        assert_eq!(inventory.product(ProductId::new(9)).unwrap().stock(), 1);
    }
}
