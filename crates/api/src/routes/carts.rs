//! Cart endpoints, nested under the owning customer.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::{CustomerId, ProductId};
use domain::{Cart, CartItem};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct QuantityRequest {
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct CartItemResponse {
    pub product_id: u64,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

impl From<&CartItem> for CartItemResponse {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id().value(),
            product_name: item.product_name().to_string(),
            quantity: item.quantity(),
            unit_price_cents: item.unit_price().cents(),
            subtotal_cents: item.subtotal().cents(),
        }
    }
}

#[derive(Serialize)]
pub struct CartResponse {
    pub id: u64,
    pub customer_id: u64,
    pub items: Vec<CartItemResponse>,
    pub total_quantity: u64,
    pub total_cents: i64,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            id: cart.id().value(),
            customer_id: cart.customer_id().value(),
            items: cart.items().iter().map(CartItemResponse::from).collect(),
            total_quantity: cart.total_quantity(),
            total_cents: cart.total().cents(),
        }
    }
}

/// GET /customers/{id}/cart: creates the cart on first access.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<u64>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.carts.get_or_create(CustomerId::new(customer_id)).await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// POST /customers/{id}/cart/items
#[tracing::instrument(skip(state, req))]
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<u64>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state
        .carts
        .add_item(CustomerId::new(customer_id), req.product_id, req.quantity)
        .await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// PUT /customers/{id}/cart/items/{product_id}
#[tracing::instrument(skip(state, req))]
pub async fn change_quantity(
    State(state): State<Arc<AppState>>,
    Path((customer_id, product_id)): Path<(u64, u64)>,
    Json(req): Json<QuantityRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state
        .carts
        .change_item_quantity(
            CustomerId::new(customer_id),
            ProductId::new(product_id),
            req.quantity,
        )
        .await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// DELETE /customers/{id}/cart/items/{product_id}
#[tracing::instrument(skip(state))]
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path((customer_id, product_id)): Path<(u64, u64)>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state
        .carts
        .remove_item(CustomerId::new(customer_id), ProductId::new(product_id))
        .await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// DELETE /customers/{id}/cart
#[tracing::instrument(skip(state))]
pub async fn clear(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<u64>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.carts.clear(CustomerId::new(customer_id)).await?;
    Ok(Json(CartResponse::from(&cart)))
}
