//! In-memory repository implementations.
//!
//! Rows live in a `BTreeMap` behind `Arc<RwLock<..>>`, so clones of a
//! repository share the same data and listings come back in id order.

mod carts;
mod customers;
mod orders;
mod products;

pub use carts::InMemoryCartRepository;
pub use customers::InMemoryCustomerRepository;
pub use orders::InMemoryOrderRepository;
pub use products::InMemoryProductRepository;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{Result, StoreError};

/// Shared keyed table backing each in-memory repository.
#[derive(Clone)]
struct Table<K, V> {
    entity: &'static str,
    rows: Arc<RwLock<BTreeMap<K, V>>>,
}

impl<K, V> Table<K, V>
where
    K: Ord + Copy + Into<u64>,
    V: Clone,
{
    fn new(entity: &'static str) -> Self {
        Self {
            entity,
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    async fn get(&self, id: K) -> Option<V> {
        self.rows.read().await.get(&id).cloned()
    }

    async fn contains(&self, id: K) -> bool {
        self.rows.read().await.contains_key(&id)
    }

    async fn insert(&self, id: K, row: V) -> Result<()> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&id) {
            return Err(StoreError::AlreadyExists {
                entity: self.entity,
                id: id.into(),
            });
        }
        rows.insert(id, row);
        Ok(())
    }

    async fn replace(&self, id: K, row: V) -> Result<()> {
        self.modify(id, |existing| *existing = row).await
    }

    async fn modify(&self, id: K, f: impl FnOnce(&mut V)) -> Result<()> {
        let mut rows = self.rows.write().await;
        let existing = rows.get_mut(&id).ok_or(StoreError::NotFound {
            entity: self.entity,
            id: id.into(),
        })?;
        f(existing);
        Ok(())
    }

    async fn delete(&self, id: K) -> Result<()> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                entity: self.entity,
                id: id.into(),
            })
    }

    async fn find(&self, predicate: impl Fn(&V) -> bool) -> Option<V> {
        self.rows
            .read()
            .await
            .values()
            .find(|row| predicate(row))
            .cloned()
    }

    async fn select(&self, predicate: impl Fn(&V) -> bool) -> Vec<V> {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }
}

/// Case-insensitive substring match.
fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
