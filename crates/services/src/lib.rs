//! Orchestration layer for the storefront.
//!
//! Services sequence repository lookups and domain calls:
//! - customers must exist before their cart is touched
//! - products must exist (and be active) before they are added to a cart
//! - orders are created only from a non-empty cart, which is then cleared
//!
//! All services built from the same [`Repositories`] share one write guard,
//! so mutations are serialized (single writer) while reads run freely.

pub mod carts;
pub mod catalog;
pub mod customers;
pub mod error;
pub mod orders;
pub mod repositories;
pub mod requests;

pub use carts::CartService;
pub use catalog::ProductService;
pub use customers::CustomerService;
pub use error::{Result, ServiceError};
pub use orders::{CheckoutSettings, OrderService, PaymentOutcome};
pub use repositories::Repositories;
pub use requests::{
    CreateOrder, CustomerUpdate, NewCustomer, NewProduct, PaymentRequest, ProductUpdate,
    StatusUpdate,
};
