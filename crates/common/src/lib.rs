//! Shared value types used across the storefront crates.

pub mod money;
pub mod types;

pub use money::Money;
pub use types::{CartId, CartItemId, CustomerId, OrderId, PaymentId, ProductId};
