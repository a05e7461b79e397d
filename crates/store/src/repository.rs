//! Repository traits.
//!
//! All implementations must be thread-safe (Send + Sync). Updates of rows
//! that do not exist fail with [`StoreError::NotFound`](crate::StoreError).

use async_trait::async_trait;
use common::{CartId, CustomerId, OrderId, PaymentId, ProductId};
use domain::{Cart, Customer, Order, OrderStatus, Product};

use crate::Result;

/// Storage for catalog products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Allocates an identifier for a new product.
    fn next_id(&self) -> ProductId;

    async fn get(&self, id: ProductId) -> Result<Option<Product>>;

    /// Lists products in id order. Inactive ones are skipped when
    /// `active_only` is set.
    async fn list(&self, active_only: bool) -> Result<Vec<Product>>;

    /// Lists active products whose category matches, ignoring case.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>>;

    /// Finds active products whose name or description contains `term`,
    /// ignoring case. A blank term matches nothing.
    async fn search(&self, term: &str) -> Result<Vec<Product>>;

    async fn add(&self, product: Product) -> Result<()>;

    async fn update(&self, product: Product) -> Result<()>;

    /// Soft-deletes a product by clearing its active flag.
    async fn remove(&self, id: ProductId) -> Result<()>;

    async fn exists(&self, id: ProductId) -> Result<bool>;
}

/// Storage for customers.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    fn next_id(&self) -> CustomerId;

    async fn get(&self, id: CustomerId) -> Result<Option<Customer>>;

    /// Looks a customer up by email, ignoring case.
    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>>;

    async fn get_by_cpf(&self, cpf: &str) -> Result<Option<Customer>>;

    async fn list(&self, active_only: bool) -> Result<Vec<Customer>>;

    async fn add(&self, customer: Customer) -> Result<()>;

    async fn update(&self, customer: Customer) -> Result<()>;

    /// Soft-deletes a customer by clearing its active flag.
    async fn remove(&self, id: CustomerId) -> Result<()>;

    async fn exists(&self, id: CustomerId) -> Result<bool>;

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    async fn exists_by_cpf(&self, cpf: &str) -> Result<bool> {
        Ok(self.get_by_cpf(cpf).await?.is_some())
    }
}

/// Storage for carts, one per customer.
#[async_trait]
pub trait CartRepository: Send + Sync {
    fn next_id(&self) -> CartId;

    async fn get(&self, id: CartId) -> Result<Option<Cart>>;

    async fn get_by_customer(&self, customer_id: CustomerId) -> Result<Option<Cart>>;

    async fn add(&self, cart: Cart) -> Result<()>;

    async fn update(&self, cart: Cart) -> Result<()>;

    async fn remove(&self, id: CartId) -> Result<()>;

    async fn exists(&self, id: CartId) -> Result<bool>;
}

/// Storage for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    fn next_id(&self) -> OrderId;

    /// Allocates an identifier for a payment attached to an order.
    fn next_payment_id(&self) -> PaymentId;

    async fn get(&self, id: OrderId) -> Result<Option<Order>>;

    async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>>;

    async fn list_all(&self) -> Result<Vec<Order>>;

    async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>>;

    async fn add(&self, order: Order) -> Result<()>;

    async fn update(&self, order: Order) -> Result<()>;

    async fn remove(&self, id: OrderId) -> Result<()>;

    async fn exists(&self, id: OrderId) -> Result<bool>;
}
