//! Catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::ProductId;
use domain::Product;
use serde::{Deserialize, Serialize};
use services::{NewProduct, ProductUpdate};

use super::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct RestockRequest {
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_cents: i64,
    pub stock: u32,
    pub active: bool,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().value(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            category: product.category().to_string(),
            price_cents: product.price().cents(),
            stock: product.stock(),
            active: product.is_active(),
        }
    }
}

fn to_responses(products: &[Product]) -> Vec<ProductResponse> {
    products.iter().map(ProductResponse::from).collect()
}

/// POST /products
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewProduct>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = state.products.create(req).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(&product))))
}

/// GET /products: active products, optionally filtered by `category` or
/// searched by `q`.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = match (query.category, query.q) {
        (Some(_), Some(_)) => {
            return Err(ApiError::BadRequest(
                "use either category or q, not both".to_string(),
            ));
        }
        (Some(category), None) => state.products.list_by_category(&category).await?,
        (None, Some(term)) => state.products.search(&term).await?,
        (None, None) => state.products.list().await?,
    };
    Ok(Json(to_responses(&products)))
}

/// GET /products/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.get(ProductId::new(id)).await?;
    Ok(Json(ProductResponse::from(&product)))
}

/// PATCH /products/{id}
#[tracing::instrument(skip(state, update))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.update(ProductId::new(id), update).await?;
    Ok(Json(ProductResponse::from(&product)))
}

/// POST /products/{id}/restock
#[tracing::instrument(skip(state, req))]
pub async fn restock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<RestockRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .products
        .restock(ProductId::new(id), req.quantity)
        .await?;
    Ok(Json(ProductResponse::from(&product)))
}

/// DELETE /products/{id}: soft delete.
#[tracing::instrument(skip(state))]
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.products.remove(ProductId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
