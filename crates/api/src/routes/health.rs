//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub items: usize,
    pub orders: usize,
}

/// GET /health: liveness plus the size of each ledger.
pub async fn check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        items: state.inventory.len().await,
        orders: state.orders.len().await,
    })
}
