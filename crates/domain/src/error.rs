//! Domain error types.

use common::{Money, ProductId};
use thiserror::Error;

use crate::order::OrderStatus;

/// Errors raised by domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Checkout attempted with no items.
    #[error("Cannot place an order from an empty cart")]
    EmptyCart,

    /// Not enough stock to satisfy the requested quantity.
    #[error(
        "Insufficient stock for product '{product}': available {available}, requested {requested}"
    )]
    InsufficientStock {
        product: String,
        available: u32,
        requested: u32,
    },

    /// Quantity must be greater than zero.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Price must be greater than zero and at most [`MAX_PRICE`].
    #[error("Invalid price: {price} (must be greater than 0 and at most {max})", max = MAX_PRICE)]
    InvalidPrice { price: Money },

    /// Payment is missing, mismatched, or in the wrong status.
    #[error("Invalid payment: {reason}")]
    InvalidPayment { reason: String },

    /// A field failed validation.
    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// Order is not in the expected status.
    #[error("Invalid state transition: cannot {action} from {from} status")]
    InvalidTransition {
        from: OrderStatus,
        action: &'static str,
    },

    /// No cart line exists for the product.
    #[error("Item not found in cart: product {product_id}")]
    ItemNotFound { product_id: ProductId },
}

impl DomainError {
    pub(crate) fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_payment(reason: impl Into<String>) -> Self {
        DomainError::InvalidPayment {
            reason: reason.into(),
        }
    }
}

/// Highest unit price accepted for a product or cart line (R$10 billion).
pub const MAX_PRICE: Money = Money::from_cents(1_000_000_000_000);

/// Fails with `InvalidPrice` unless `0 < price <= MAX_PRICE`.
pub(crate) fn require_valid_price(price: Money) -> Result<Money, DomainError> {
    if price.is_positive() && price <= MAX_PRICE {
        Ok(price)
    } else {
        Err(DomainError::InvalidPrice { price })
    }
}

/// Fails with `InvalidArgument` when `value` is blank.
pub(crate) fn require_non_blank(field: &'static str, value: String) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::invalid_argument(field, "must not be empty"))
    } else {
        Ok(value)
    }
}
