//! Shared repository handles.

use std::collections::HashMap;
use std::sync::Arc;

use common::ProductId;
use domain::Product;
use store::{
    CartRepository, CustomerRepository, InMemoryCartRepository, InMemoryCustomerRepository,
    InMemoryOrderRepository, InMemoryProductRepository, OrderRepository, ProductRepository,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::Result;

/// The repositories every service works against, plus the write guard that
/// serializes mutations across services.
#[derive(Clone)]
pub struct Repositories {
    pub products: Arc<dyn ProductRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub orders: Arc<dyn OrderRepository>,
    writer: Arc<Mutex<()>>,
}

impl Repositories {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        customers: Arc<dyn CustomerRepository>,
        carts: Arc<dyn CartRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            products,
            customers,
            carts,
            orders,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Creates empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemoryCustomerRepository::new()),
            Arc::new(InMemoryCartRepository::new()),
            Arc::new(InMemoryOrderRepository::new()),
        )
    }

    /// Waits for exclusive write access.
    pub(crate) async fn write(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().await
    }

    /// Loads the live products for `ids`. Unknown ids are left out, which
    /// leaves those lines detached.
    pub(crate) async fn load_inventory(
        &self,
        ids: impl IntoIterator<Item = ProductId>,
    ) -> Result<HashMap<ProductId, Product>> {
        let mut inventory = HashMap::new();
        for id in ids {
            if let Some(product) = self.products.get(id).await? {
                inventory.insert(id, product);
            }
        }
        Ok(inventory)
    }

    /// Writes back every product in the inventory.
    pub(crate) async fn save_inventory(
        &self,
        inventory: HashMap<ProductId, Product>,
    ) -> Result<()> {
        for product in inventory.into_values() {
            self.products.update(product).await?;
        }
        Ok(())
    }
}
