//! Inventory-bearing catalog product.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, require_non_blank, require_valid_price};

/// A catalog product with its available stock.
///
/// Price is always positive. Products are soft-deleted by clearing the
/// active flag rather than being erased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    stock: u32,
    description: String,
    category: String,
    active: bool,
}

impl Product {
    /// Creates an active product.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        stock: u32,
    ) -> Result<Self, DomainError> {
        let name = require_non_blank("name", name.into())?;
        let price = require_valid_price(price)?;

        Ok(Self {
            id,
            name,
            price,
            stock,
            description: String::new(),
            category: String::new(),
            active: true,
        })
    }

    /// Sets the description, builder style.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category, builder style.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        self.name = require_non_blank("name", name.into())?;
        Ok(())
    }

    pub fn set_price(&mut self, price: Money) -> Result<(), DomainError> {
        let price = require_valid_price(price)?;
        self.price = price;
        Ok(())
    }

    pub fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Removes `quantity` units from stock.
    pub fn decrease_stock(&mut self, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }
        if self.stock < quantity {
            return Err(self.insufficient(quantity));
        }
        self.stock -= quantity;
        Ok(())
    }

    /// Adds `quantity` units to stock.
    pub fn increase_stock(&mut self, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }
        self.stock = self
            .stock
            .checked_add(quantity)
            .ok_or(DomainError::InvalidQuantity { quantity })?;
        Ok(())
    }

    /// Returns true if current stock covers `quantity`.
    pub fn has_sufficient_stock(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }

    /// Builds the `InsufficientStock` error for a request against this product.
    pub fn insufficient(&self, requested: u32) -> DomainError {
        DomainError::InsufficientStock {
            product: self.name.clone(),
            available: self.stock,
            requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(stock: u32) -> Product {
        Product::new(ProductId::new(1), "Widget", Money::from_cents(1000), stock).unwrap()
    }

    #[test]
    fn test_new_product_is_active() {
        let product = widget(5)
            .with_description("A widget")
            .with_category("Tools");
        assert!(product.is_active());
        assert_eq!(product.category(), "Tools");
        assert_eq!(product.description(), "A widget");
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let result = Product::new(ProductId::new(1), "  ", Money::from_cents(100), 1);
        assert!(matches!(
            result,
            Err(DomainError::InvalidArgument { field: "name", .. })
        ));
    }

    #[test]
    fn test_new_rejects_non_positive_price() {
        let result = Product::new(ProductId::new(1), "Widget", Money::zero(), 1);
        assert!(matches!(result, Err(DomainError::InvalidPrice { .. })));
    }

    #[test]
    fn test_price_above_ceiling_rejected() {
        let result = Product::new(
            ProductId::new(1),
            "Widget",
            crate::MAX_PRICE + Money::from_cents(1),
            1,
        );
        assert!(matches!(result, Err(DomainError::InvalidPrice { .. })));
        assert!(Product::new(ProductId::new(1), "Widget", crate::MAX_PRICE, 1).is_ok());

        let mut product = widget(1);
        assert!(product.set_price(Money::from_cents(i64::MAX / 2)).is_err());
        assert_eq!(product.price(), Money::from_cents(1000));
    }

    #[test]
    fn test_set_price_validates() {
        let mut product = widget(1);
        assert!(product.set_price(Money::from_cents(-5)).is_err());
        assert_eq!(product.price(), Money::from_cents(1000));
        product.set_price(Money::from_cents(1500)).unwrap();
        assert_eq!(product.price(), Money::from_cents(1500));
    }

    #[test]
    fn test_decrease_then_increase_restores_stock() {
        let mut product = widget(10);
        product.decrease_stock(4).unwrap();
        assert_eq!(product.stock(), 6);
        product.increase_stock(4).unwrap();
        assert_eq!(product.stock(), 10);
    }

    #[test]
    fn test_decrease_beyond_stock_fails() {
        let mut product = widget(3);
        let err = product.decrease_stock(4).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                product: "Widget".to_string(),
                available: 3,
                requested: 4,
            }
        );
        assert_eq!(product.stock(), 3);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut product = widget(3);
        assert_eq!(
            product.decrease_stock(0),
            Err(DomainError::InvalidQuantity { quantity: 0 })
        );
        assert_eq!(
            product.increase_stock(0),
            Err(DomainError::InvalidQuantity { quantity: 0 })
        );
    }

    #[test]
    fn test_has_sufficient_stock() {
        let product = widget(3);
        assert!(product.has_sufficient_stock(3));
        assert!(!product.has_sufficient_stock(4));
        assert_eq!(product.stock(), 3);
    }
}
