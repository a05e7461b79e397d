use std::sync::Arc;

use async_trait::async_trait;
use common::{CustomerId, OrderId, PaymentId};
use domain::{Order, OrderStatus};

use super::Table;
use crate::{IdSequence, OrderRepository, Result};

/// In-memory order storage. Listings are newest first.
#[derive(Clone)]
pub struct InMemoryOrderRepository {
    table: Table<OrderId, Order>,
    ids: Arc<IdSequence>,
    payment_ids: Arc<IdSequence>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("Order"),
            ids: Arc::new(IdSequence::new()),
            payment_ids: Arc::new(IdSequence::new()),
        }
    }

    async fn select_newest_first(&self, predicate: impl Fn(&Order) -> bool) -> Vec<Order> {
        let mut orders = self.table.select(predicate).await;
        orders.reverse();
        orders
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    fn next_id(&self) -> OrderId {
        self.ids.next_id()
    }

    fn next_payment_id(&self) -> PaymentId {
        self.payment_ids.next_id()
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.table.get(id).await)
    }

    async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        Ok(self
            .select_newest_first(|o| o.customer_id() == customer_id)
            .await)
    }

    async fn list_all(&self) -> Result<Vec<Order>> {
        Ok(self.select_newest_first(|_| true).await)
    }

    async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        Ok(self.select_newest_first(|o| o.status() == status).await)
    }

    async fn add(&self, order: Order) -> Result<()> {
        self.table.insert(order.id(), order).await
    }

    async fn update(&self, order: Order) -> Result<()> {
        self.table.replace(order.id(), order).await
    }

    async fn remove(&self, id: OrderId) -> Result<()> {
        self.table.delete(id).await
    }

    async fn exists(&self, id: OrderId) -> Result<bool> {
        Ok(self.table.contains(id).await)
    }
}

#[cfg(test)]
mod tests {
    use common::{CartId, Money, ProductId};
    use domain::{Cart, Detached, Product};

    use super::*;

    fn order_for(repo: &InMemoryOrderRepository, customer: u64) -> Order {
        let product = Product::new(ProductId::new(1), "Widget", Money::from_reais(10), 10).unwrap();
        let mut cart = Cart::new(CartId::new(customer), CustomerId::new(customer));
        cart.add_item(&product, 1).unwrap();
        Order::from_cart(repo.next_id(), &cart, &Detached).unwrap()
    }

    #[tokio::test]
    async fn listings_are_newest_first() {
        let repo = InMemoryOrderRepository::new();
        for customer in [1, 2, 1] {
            let order = order_for(&repo, customer);
            repo.add(order).await.unwrap();
        }

        let ids: Vec<_> = repo
            .list_by_customer(CustomerId::new(1))
            .await
            .unwrap()
            .iter()
            .map(Order::id)
            .collect();
        assert_eq!(ids, [OrderId::new(3), OrderId::new(1)]);
        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn list_by_status_tracks_updates() {
        let repo = InMemoryOrderRepository::new();
        let mut order = order_for(&repo, 1);
        repo.add(order.clone()).await.unwrap();
        assert_eq!(
            repo.list_by_status(OrderStatus::Pending).await.unwrap().len(),
            1
        );

        order.cancel("test", &mut Detached).unwrap();
        repo.update(order).await.unwrap();

        assert!(
            repo.list_by_status(OrderStatus::Pending)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            repo.list_by_status(OrderStatus::Cancelled)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn payment_ids_have_their_own_sequence() {
        let repo = InMemoryOrderRepository::new();
        let _ = repo.next_id();
        assert_eq!(repo.next_payment_id(), PaymentId::new(1));
    }
}
