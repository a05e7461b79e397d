//! Service error types.

use common::{CustomerId, OrderId, ProductId};
use domain::DomainError;
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// A uniqueness rule was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Domain rule violation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Repository error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Returns true for the not-found family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::CustomerNotFound(_)
                | ServiceError::ProductNotFound(_)
                | ServiceError::OrderNotFound(_)
        )
    }
}

/// Convenience type alias for service results.
pub type Result<T> = std::result::Result<T, ServiceError>;
