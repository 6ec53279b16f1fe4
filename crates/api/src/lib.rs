//! HTTP API server for the inventory and order ledgers.
//!
//! Exposes item and order endpoints plus order fulfillment, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;
use routes::metrics::MetricsState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(MetricsState {
            handle: metrics_handle,
            app: state.clone(),
        });

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/items",
            get(routes::items::list).post(routes::items::create),
        )
        .route(
            "/items/{name}",
            get(routes::items::get)
                .put(routes::items::adjust)
                .delete(routes::items::delete),
        )
        .route("/counts", get(routes::items::counts))
        .route(
            "/orders",
            get(routes::orders::list).post(routes::orders::create),
        )
        .route("/orders/{id}", get(routes::orders::get))
        .route("/orders/{id}/{action}", post(routes::orders::apply_action))
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

/// Creates application state around empty ledgers.
pub fn create_default_state() -> Arc<AppState> {
    Arc::new(AppState::new())
}
