//! Persistence contracts consumed by the services layer.
//!
//! Each aggregate has an `async_trait` repository trait. The in-memory
//! implementations keep rows behind `Arc<RwLock<..>>` and own an
//! [`IdSequence`] that hands out identifiers.

pub mod error;
pub mod memory;
pub mod repository;
pub mod sequence;

pub use error::{Result, StoreError};
pub use memory::{
    InMemoryCartRepository, InMemoryCustomerRepository, InMemoryOrderRepository,
    InMemoryProductRepository,
};
pub use repository::{CartRepository, CustomerRepository, OrderRepository, ProductRepository};
pub use sequence::IdSequence;
