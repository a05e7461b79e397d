//! Product catalog service.

use common::ProductId;
use domain::Product;

use crate::error::{Result, ServiceError};
use crate::repositories::Repositories;
use crate::requests::{NewProduct, ProductUpdate};

/// Service for managing catalog products.
#[derive(Clone)]
pub struct ProductService {
    repos: Repositories,
}

impl ProductService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Creates an active product.
    #[tracing::instrument(skip(self, req), fields(name = %req.name))]
    pub async fn create(&self, req: NewProduct) -> Result<Product> {
        let _guard = self.repos.write().await;

        let product = Product::new(self.repos.products.next_id(), req.name, req.price, req.stock)?
            .with_description(req.description)
            .with_category(req.category);
        self.repos.products.add(product.clone()).await?;

        tracing::info!(product_id = %product.id(), "product created");
        Ok(product)
    }

    /// Returns a product, active or not.
    pub async fn get(&self, id: ProductId) -> Result<Product> {
        self.repos
            .products
            .get(id)
            .await?
            .ok_or(ServiceError::ProductNotFound(id))
    }

    /// Lists active products.
    pub async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.repos.products.list(true).await?)
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Product>> {
        Ok(self.repos.products.list_by_category(category).await?)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Product>> {
        Ok(self.repos.products.search(term).await?)
    }

    /// Applies the fields present in `update`. Nothing is stored if any
    /// field fails validation.
    #[tracing::instrument(skip(self, update))]
    pub async fn update(&self, id: ProductId, update: ProductUpdate) -> Result<Product> {
        let _guard = self.repos.write().await;
        let mut product = self.get(id).await?;

        if let Some(name) = update.name {
            product.set_name(name)?;
        }
        if let Some(price) = update.price {
            product.set_price(price)?;
        }
        if let Some(stock) = update.stock {
            product.set_stock(stock);
        }
        if let Some(description) = update.description {
            product.set_description(description);
        }
        if let Some(category) = update.category {
            product.set_category(category);
        }
        if let Some(active) = update.active {
            product.set_active(active);
        }

        self.repos.products.update(product.clone()).await?;
        Ok(product)
    }

    /// Adds `quantity` units to a product's stock.
    #[tracing::instrument(skip(self))]
    pub async fn restock(&self, id: ProductId, quantity: u32) -> Result<Product> {
        let _guard = self.repos.write().await;
        let mut product = self.get(id).await?;
        product.increase_stock(quantity)?;
        self.repos.products.update(product.clone()).await?;

        tracing::info!(product_id = %id, stock = product.stock(), "product restocked");
        Ok(product)
    }

    /// Soft-deletes a product.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: ProductId) -> Result<()> {
        let _guard = self.repos.write().await;
        if !self.repos.products.exists(id).await? {
            return Err(ServiceError::ProductNotFound(id));
        }
        self.repos.products.remove(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use common::Money;
    use domain::DomainError;

    use super::*;

    fn service() -> ProductService {
        ProductService::new(Repositories::in_memory())
    }

    fn keyboard() -> NewProduct {
        NewProduct {
            name: "Keyboard".to_string(),
            price: Money::from_reais(150),
            stock: 10,
            description: "Mechanical".to_string(),
            category: "Peripherals".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let created = service.create(keyboard()).await.unwrap();
        assert_eq!(created.id(), ProductId::new(1));

        let fetched = service.get(created.id()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_zero_price() {
        let service = service();
        let mut req = keyboard();
        req.price = Money::zero();
        assert!(matches!(
            service.create(req).await,
            Err(ServiceError::Domain(DomainError::InvalidPrice { .. }))
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update() {
        let service = service();
        let id = service.create(keyboard()).await.unwrap().id();

        let updated = service
            .update(
                id,
                ProductUpdate {
                    price: Some(Money::from_reais(120)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price(), Money::from_reais(120));
        assert_eq!(updated.name(), "Keyboard");
        assert_eq!(updated.stock(), 10);
    }

    #[tokio::test]
    async fn test_invalid_update_is_not_stored() {
        let service = service();
        let id = service.create(keyboard()).await.unwrap().id();

        let result = service
            .update(
                id,
                ProductUpdate {
                    name: Some("Renamed".to_string()),
                    price: Some(Money::from_cents(-5)),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_err());
        assert_eq!(service.get(id).await.unwrap().name(), "Keyboard");
    }

    #[tokio::test]
    async fn test_restock_and_remove() {
        let service = service();
        let id = service.create(keyboard()).await.unwrap().id();

        assert_eq!(service.restock(id, 5).await.unwrap().stock(), 15);
        assert!(service.restock(id, 0).await.is_err());

        service.remove(id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
        assert!(!service.get(id).await.unwrap().is_active());
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let service = service();
        let missing = ProductId::new(42);
        assert!(matches!(
            service.get(missing).await,
            Err(ServiceError::ProductNotFound(id)) if id == missing
        ));
        assert!(service.remove(missing).await.is_err());
    }
}
