//! HTTP API server with observability for the storefront.
//!
//! Provides REST endpoints for the catalog, customers, carts and orders,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use domain::RandomAcquirer;
use metrics_exporter_prometheus::PrometheusHandle;
use services::{OrderService, Repositories};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/products",
            post(routes::products::create).get(routes::products::list),
        )
        .route(
            "/products/{id}",
            get(routes::products::get)
                .patch(routes::products::update)
                .delete(routes::products::remove),
        )
        .route("/products/{id}/restock", post(routes::products::restock))
        .route(
            "/customers",
            post(routes::customers::create).get(routes::customers::list),
        )
        .route(
            "/customers/{id}",
            get(routes::customers::get)
                .patch(routes::customers::update)
                .delete(routes::customers::remove),
        )
        .route(
            "/customers/{id}/cart",
            get(routes::carts::get).delete(routes::carts::clear),
        )
        .route("/customers/{id}/cart/items", post(routes::carts::add_item))
        .route(
            "/customers/{id}/cart/items/{product_id}",
            put(routes::carts::change_quantity).delete(routes::carts::remove_item),
        )
        .route(
            "/customers/{id}/orders",
            get(routes::orders::list_by_customer),
        )
        .route(
            "/orders",
            post(routes::orders::create).get(routes::orders::list),
        )
        .route("/orders/{id}", get(routes::orders::get))
        .route("/orders/{id}/payment", post(routes::orders::pay))
        .route("/orders/{id}/status", post(routes::orders::update_status))
        .route("/orders/{id}/cancel", post(routes::orders::cancel))
        .route("/coupons", get(routes::orders::coupons))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over in-memory repositories.
pub fn create_default_state(config: &Config) -> Arc<AppState> {
    let repos = Repositories::in_memory();
    let acquirer = Arc::new(RandomAcquirer::new(config.card_approval_rate));
    let orders = OrderService::with_acquirer(repos.clone(), config.checkout_settings(), acquirer);
    Arc::new(AppState::new(repos, orders))
}
