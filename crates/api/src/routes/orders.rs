//! Checkout, payment and fulfillment endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use domain::{Coupon, Order, OrderStatus, Payment, PaymentMethod};
use serde::{Deserialize, Serialize};
use services::{CreateOrder, PaymentRequest, StatusUpdate};

use super::AppState;
use super::carts::CartItemResponse;
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Default, Deserialize)]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct PaymentResponse {
    pub id: u64,
    pub method: String,
    pub status: String,
    pub amount_cents: i64,
    pub fee_cents: i64,
    pub processed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub qr_code: Option<String>,
    pub card_number: Option<String>,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        let (qr_code, card_number) = match payment.method() {
            PaymentMethod::Pix(pix) => (pix.qr_code().map(String::from), None),
            PaymentMethod::Card(card) => (None, Some(card.masked_number())),
        };
        Self {
            id: payment.id().value(),
            method: payment.method_description(),
            status: payment.status().to_string(),
            amount_cents: payment.amount().cents(),
            fee_cents: payment.fee().cents(),
            processed_at: payment.processed_at(),
            rejection_reason: payment.rejection_reason().map(String::from),
            qr_code,
            card_number,
        }
    }
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: u64,
    pub customer_id: u64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<CartItemResponse>,
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub delivery_address: String,
    pub notes: String,
    pub cancellation_reason: Option<String>,
    pub payment: Option<PaymentResponse>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().value(),
            customer_id: order.customer_id().value(),
            status: order.status().to_string(),
            created_at: order.created_at(),
            items: order.items().iter().map(CartItemResponse::from).collect(),
            subtotal_cents: order.subtotal().cents(),
            shipping_cents: order.shipping().cents(),
            discount_cents: order.discount().cents(),
            total_cents: order.total().cents(),
            delivery_address: order.delivery_address().to_string(),
            notes: order.notes().to_string(),
            cancellation_reason: order.cancellation_reason().map(String::from),
            payment: order.payment().map(PaymentResponse::from),
        }
    }
}

#[derive(Serialize)]
pub struct PaymentOutcomeResponse {
    pub approved: bool,
    pub order: OrderResponse,
}

#[derive(Serialize)]
pub struct CouponResponse {
    pub code: String,
    pub percent: u32,
    pub minimum_cents: i64,
    pub expires_at: DateTime<Utc>,
}

fn to_responses(orders: &[Order]) -> Vec<OrderResponse> {
    orders.iter().map(OrderResponse::from).collect()
}

// -- Handlers --

/// POST /orders: turns the customer's cart into a pending order.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrder>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order = state.orders.create_order(req).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(&order))))
}

/// GET /orders: all orders, newest first, optionally filtered by `status`.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = match query.status {
        Some(status) => state.orders.list_by_status(status).await?,
        None => state.orders.list_all().await?,
    };
    Ok(Json(to_responses(&orders)))
}

/// GET /customers/{id}/orders
#[tracing::instrument(skip(state))]
pub async fn list_by_customer(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<u64>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let customer_id = CustomerId::new(customer_id);
    // unknown customers are a 404, not an empty list
    state.customers.get(customer_id).await?;
    let orders = state.orders.list_by_customer(customer_id).await?;
    Ok(Json(to_responses(&orders)))
}

/// GET /orders/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.get(OrderId::new(id)).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// POST /orders/{id}/payment: pays the order total by Pix or card.
///
/// A rejected payment is still a successful request; `approved` tells the
/// outcome.
#[tracing::instrument(skip(state, req))]
pub async fn pay(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<PaymentOutcomeResponse>, ApiError> {
    let outcome = state.orders.process_payment(OrderId::new(id), req).await?;
    Ok(Json(PaymentOutcomeResponse {
        approved: outcome.approved,
        order: OrderResponse::from(&outcome.order),
    }))
}

/// POST /orders/{id}/status
#[tracing::instrument(skip(state))]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.update_status(OrderId::new(id), update).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// POST /orders/{id}/cancel
#[tracing::instrument(skip(state, req))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<CancelRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let reason = req
        .reason
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| "cancelled by request".to_string());
    let order = state.orders.cancel(OrderId::new(id), reason).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// GET /coupons: coupons currently honored at checkout.
pub async fn coupons(State(state): State<Arc<AppState>>) -> Json<Vec<CouponResponse>> {
    let coupons = state
        .orders
        .valid_coupons()
        .into_iter()
        .map(|(code, Coupon { percent, minimum, expires_at })| CouponResponse {
            code,
            percent,
            minimum_cents: minimum.cents(),
            expires_at,
        })
        .collect();
    Json(coupons)
}
