//! Cart service.

use common::{CustomerId, ProductId};
use domain::Cart;

use crate::error::{Result, ServiceError};
use crate::repositories::Repositories;

/// Service for a customer's cart.
///
/// Every operation first checks that the customer exists. A customer's cart
/// is created on first use and reused afterwards.
#[derive(Clone)]
pub struct CartService {
    repos: Repositories,
}

impl CartService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    async fn ensure_customer(&self, customer_id: CustomerId) -> Result<()> {
        if self.repos.customers.exists(customer_id).await? {
            Ok(())
        } else {
            Err(ServiceError::CustomerNotFound(customer_id))
        }
    }

    /// Loads the customer's cart, creating it if needed. The write guard must
    /// be held.
    async fn load_or_create(&self, customer_id: CustomerId) -> Result<Cart> {
        self.ensure_customer(customer_id).await?;

        if let Some(cart) = self.repos.carts.get_by_customer(customer_id).await? {
            return Ok(cart);
        }

        let cart = Cart::new(self.repos.carts.next_id(), customer_id);
        self.repos.carts.add(cart.clone()).await?;
        tracing::debug!(cart_id = %cart.id(), "cart created");
        Ok(cart)
    }

    /// Returns the customer's cart without creating one.
    pub async fn get(&self, customer_id: CustomerId) -> Result<Option<Cart>> {
        self.ensure_customer(customer_id).await?;
        Ok(self.repos.carts.get_by_customer(customer_id).await?)
    }

    /// Returns the customer's cart, creating an empty one on first use.
    #[tracing::instrument(skip(self))]
    pub async fn get_or_create(&self, customer_id: CustomerId) -> Result<Cart> {
        let _guard = self.repos.write().await;
        self.load_or_create(customer_id).await
    }

    /// Adds units of an active product to the cart.
    #[tracing::instrument(skip(self))]
    pub async fn add_item(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart> {
        let _guard = self.repos.write().await;
        let mut cart = self.load_or_create(customer_id).await?;

        let product = self
            .repos
            .products
            .get(product_id)
            .await?
            .filter(|p| p.is_active())
            .ok_or(ServiceError::ProductNotFound(product_id))?;

        cart.add_item(&product, quantity)?;
        self.repos.carts.update(cart.clone()).await?;

        metrics::counter!("cart_items_added_total").increment(u64::from(quantity));
        Ok(cart)
    }

    /// Removes a product's line. Missing lines are ignored.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
    ) -> Result<Cart> {
        let _guard = self.repos.write().await;
        let mut cart = self.load_or_create(customer_id).await?;

        cart.remove_item(product_id);
        self.repos.carts.update(cart.clone()).await?;
        Ok(cart)
    }

    /// Changes the quantity of a line, re-checking the product's live stock.
    #[tracing::instrument(skip(self))]
    pub async fn change_item_quantity(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart> {
        let _guard = self.repos.write().await;
        let mut cart = self.load_or_create(customer_id).await?;

        let inventory = self.repos.load_inventory([product_id]).await?;
        cart.change_item_quantity(product_id, quantity, &inventory)?;
        self.repos.carts.update(cart.clone()).await?;
        Ok(cart)
    }

    /// Empties the cart.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self, customer_id: CustomerId) -> Result<Cart> {
        let _guard = self.repos.write().await;
        let mut cart = self.load_or_create(customer_id).await?;

        cart.clear();
        self.repos.carts.update(cart.clone()).await?;
        Ok(cart)
    }
}
