//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use services::ServiceError;
use store::StoreError;
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request from the client.
    #[error("{0}")]
    BadRequest(String),

    /// Error raised by a service.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Service(err) => service_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn service_error_to_response(err: ServiceError) -> (StatusCode, String) {
    let status = match &err {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Domain(domain_err) => match domain_err {
            DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
            DomainError::ItemNotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::EmptyCart
            | DomainError::InsufficientStock { .. }
            | DomainError::InvalidQuantity { .. }
            | DomainError::InvalidPrice { .. }
            | DomainError::InvalidPayment { .. }
            | DomainError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
        },
        ServiceError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "internal server error");
    }
    (status, err.to_string())
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Service(err.into())
    }
}
