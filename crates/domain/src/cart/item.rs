//! Cart line item.

use common::{CartItemId, Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, require_valid_price};
use crate::product::Product;

/// A line in a cart or order.
///
/// The unit price is captured from the product when the line is created and
/// does not follow later price changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    id: CartItemId,
    product_id: ProductId,
    product_name: String,
    quantity: u32,
    unit_price: Money,
}

impl CartItem {
    /// Creates a line for `quantity` units of `product` at its current price.
    pub fn new(id: CartItemId, product: &Product, quantity: u32) -> Result<Self, DomainError> {
        let mut item = Self {
            id,
            product_id: product.id(),
            product_name: product.name().to_string(),
            quantity: 1,
            unit_price: product.price(),
        };
        item.set_quantity(quantity)?;
        item.set_unit_price(product.price())?;
        Ok(item)
    }

    /// Returns the line identifier.
    pub fn id(&self) -> CartItemId {
        self.id
    }

    /// Returns the referenced product.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns the product name captured when the line was created.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns quantity × unit price.
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }

    /// Sets the quantity without a stock check.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Overrides the captured unit price.
    pub fn set_unit_price(&mut self, price: Money) -> Result<(), DomainError> {
        let price = require_valid_price(price)?;
        self.unit_price = price;
        Ok(())
    }

    /// Changes the quantity, re-checking stock when the live product is attached.
    pub fn change_quantity(
        &mut self,
        quantity: u32,
        product: Option<&Product>,
    ) -> Result<(), DomainError> {
        if let Some(product) = product
            && !product.has_sufficient_stock(quantity)
        {
            return Err(product.insufficient(quantity));
        }
        self.set_quantity(quantity)
    }
}
