use std::sync::Arc;

use async_trait::async_trait;
use common::{CartId, CustomerId};
use domain::Cart;

use super::Table;
use crate::{CartRepository, IdSequence, Result};

/// In-memory cart storage.
#[derive(Clone)]
pub struct InMemoryCartRepository {
    table: Table<CartId, Cart>,
    ids: Arc<IdSequence>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("Cart"),
            ids: Arc::new(IdSequence::new()),
        }
    }
}

impl Default for InMemoryCartRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    fn next_id(&self) -> CartId {
        self.ids.next_id()
    }

    async fn get(&self, id: CartId) -> Result<Option<Cart>> {
        Ok(self.table.get(id).await)
    }

    async fn get_by_customer(&self, customer_id: CustomerId) -> Result<Option<Cart>> {
        Ok(self.table.find(|c| c.customer_id() == customer_id).await)
    }

    async fn add(&self, cart: Cart) -> Result<()> {
        self.table.insert(cart.id(), cart).await
    }

    async fn update(&self, cart: Cart) -> Result<()> {
        self.table.replace(cart.id(), cart).await
    }

    async fn remove(&self, id: CartId) -> Result<()> {
        self.table.delete(id).await
    }

    async fn exists(&self, id: CartId) -> Result<bool> {
        Ok(self.table.contains(id).await)
    }
}
