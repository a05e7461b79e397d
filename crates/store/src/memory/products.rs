use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;
use domain::Product;

use super::{Table, contains_ignore_case};
use crate::{IdSequence, ProductRepository, Result};

/// In-memory product catalog.
#[derive(Clone)]
pub struct InMemoryProductRepository {
    table: Table<ProductId, Product>,
    ids: Arc<IdSequence>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("Product"),
            ids: Arc::new(IdSequence::new()),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    fn next_id(&self) -> ProductId {
        self.ids.next_id()
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.table.get(id).await)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Product>> {
        Ok(self.table.select(|p| !active_only || p.is_active()).await)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>> {
        Ok(self
            .table
            .select(|p| p.is_active() && p.category().eq_ignore_ascii_case(category))
            .await)
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .table
            .select(|p| {
                p.is_active()
                    && (contains_ignore_case(p.name(), &term)
                        || contains_ignore_case(p.description(), &term))
            })
            .await)
    }

    async fn add(&self, product: Product) -> Result<()> {
        self.table.insert(product.id(), product).await
    }

    async fn update(&self, product: Product) -> Result<()> {
        self.table.replace(product.id(), product).await
    }

    async fn remove(&self, id: ProductId) -> Result<()> {
        self.table.modify(id, |p| p.set_active(false)).await
    }

    async fn exists(&self, id: ProductId) -> Result<bool> {
        Ok(self.table.contains(id).await)
    }
}
