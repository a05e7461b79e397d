//! HTTP route handlers.
//!
//! Monetary fields in request and response bodies are integer cents.

pub mod carts;
pub mod customers;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod products;

use services::{CartService, CustomerService, OrderService, ProductService, Repositories};

/// Shared application state accessible from all handlers.
///
/// All services share the same repositories and therefore the same write
/// guard.
pub struct AppState {
    pub products: ProductService,
    pub customers: CustomerService,
    pub carts: CartService,
    pub orders: OrderService,
}

impl AppState {
    /// Builds the catalog, customer and cart services over `repos`. The order
    /// service is passed in so callers can choose its acquirer and settings.
    pub fn new(repos: Repositories, orders: OrderService) -> Self {
        Self {
            products: ProductService::new(repos.clone()),
            customers: CustomerService::new(repos.clone()),
            carts: CartService::new(repos),
            orders,
        }
    }
}
