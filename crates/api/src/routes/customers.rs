//! Customer endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::CustomerId;
use domain::Customer;
use serde::{Deserialize, Serialize};
use services::{CustomerUpdate, NewCustomer};

use super::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub email: Option<String>,
    pub cpf: Option<String>,
}

#[derive(Serialize)]
pub struct CustomerResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub registered_at: DateTime<Utc>,
    pub active: bool,
}

impl From<&Customer> for CustomerResponse {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().value(),
            name: customer.name().to_string(),
            email: customer.email().to_string(),
            cpf: customer.cpf().to_string(),
            phone: customer.phone().to_string(),
            registered_at: customer.registered_at(),
            active: customer.is_active(),
        }
    }
}

/// POST /customers
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewCustomer>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    let customer = state.customers.create(req).await?;
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(&customer))))
}

/// GET /customers: active customers, or a single lookup by `email` or `cpf`.
#[tracing::instrument(skip(state, query))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let customers = match (query.email, query.cpf) {
        (Some(email), _) => state.customers.get_by_email(&email).await?.into_iter().collect(),
        (None, Some(cpf)) => state.customers.get_by_cpf(&cpf).await?.into_iter().collect(),
        (None, None) => state.customers.list().await?,
    };
    Ok(Json(customers.iter().map(CustomerResponse::from).collect()))
}

/// GET /customers/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state.customers.get(CustomerId::new(id)).await?;
    Ok(Json(CustomerResponse::from(&customer)))
}

/// PATCH /customers/{id}
#[tracing::instrument(skip(state, update))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(update): Json<CustomerUpdate>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state.customers.update(CustomerId::new(id), update).await?;
    Ok(Json(CustomerResponse::from(&customer)))
}

/// DELETE /customers/{id}: soft delete.
#[tracing::instrument(skip(state))]
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.customers.remove(CustomerId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
