//! Shopping cart aggregate.

mod item;

pub use item::CartItem;

use chrono::{DateTime, Utc};
use common::{CartId, CartItemId, CustomerId, Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::inventory::Inventory;
use crate::product::Product;

/// A customer's staging area for prospective order items.
///
/// Holds at most one line per product. Every successful mutation refreshes
/// `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    id: CartId,
    customer_id: CustomerId,
    items: Vec<CartItem>,
    next_item_id: u64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Cart {
    /// Creates an empty cart for a customer.
    pub fn new(id: CartId, customer_id: CustomerId) -> Self {
        Self {
            id,
            customer_id,
            items: Vec::new(),
            next_item_id: 1,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Returns the lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the line for a product.
    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id() == product_id)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the time of the last mutation, if any.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the sum of line subtotals.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Returns the sum of line quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` units of `product`.
    ///
    /// An existing line for the same product has its quantity increased, and
    /// the combined quantity is checked against stock.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }
        if !product.has_sufficient_stock(quantity) {
            return Err(product.insufficient(quantity));
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id() == product.id())
        {
            let combined = existing
                .quantity()
                .checked_add(quantity)
                .ok_or(DomainError::InvalidQuantity { quantity })?;
            existing.change_quantity(combined, Some(product))?;
        } else {
            let item_id = CartItemId::new(self.next_item_id);
            self.items.push(CartItem::new(item_id, product, quantity)?);
            self.next_item_id += 1;
        }

        self.touch();
        Ok(())
    }

    /// Removes the line for a product. Absent lines are ignored.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let before = self.items.len();
        self.items.retain(|i| i.product_id() != product_id);
        if self.items.len() != before {
            self.touch();
        }
    }

    /// Changes the quantity of an existing line.
    pub fn change_item_quantity<I: Inventory + ?Sized>(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        inventory: &I,
    ) -> Result<(), DomainError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id() == product_id)
            .ok_or(DomainError::ItemNotFound { product_id })?;

        item.change_quantity(quantity, inventory.product(product_id))?;
        self.touch();
        Ok(())
    }

    /// Removes all lines.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Re-checks the cart right before it becomes an order.
    ///
    /// Fails on an empty cart, or when an attached product can no longer
    /// cover its line. Nothing is mutated.
    pub fn validate_for_checkout<I: Inventory + ?Sized>(
        &self,
        inventory: &I,
    ) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        for item in &self.items {
            if let Some(product) = inventory.product(item.product_id())
                && !product.has_sufficient_stock(item.quantity())
            {
                return Err(product.insufficient(item.quantity()));
            }
        }

        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
