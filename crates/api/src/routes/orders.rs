//! Order endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::OrderId;
use fulfillment::OrderAction;
use ledger::{Contents, OrderRecord, OrderStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AppState;
use crate::error::ApiError;

// -- Request types --

/// Body of `POST /orders`.
#[derive(Deserialize)]
pub struct CreateOrderRequest {
    /// Order ID; generated when absent.
    pub id: Option<String>,
    pub contents: Contents,
    /// Accepted and ignored: new orders are always pending.
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderCreatedResponse {
    pub id: OrderId,
    pub status: OrderStatus,
}

#[derive(Serialize)]
pub struct OrderActionResponse {
    pub id: OrderId,
    pub action: &'static str,
    pub status: OrderStatus,
}

// -- Handlers --

/// GET /orders: every order keyed by ID.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Json<BTreeMap<OrderId, OrderRecord>> {
    Json(state.orders.list().await)
}

/// GET /orders/{id}: a single order.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderRecord>, ApiError> {
    let order = state.orders.get(&OrderId::new(id)).await?;
    Ok(Json(order))
}

/// POST /orders: place a new pending order.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError> {
    let id = match req.id {
        Some(id) if id.trim().is_empty() => {
            return Err(ApiError::BadRequest("Order ID must not be empty".to_string()));
        }
        Some(id) => OrderId::new(id),
        None => OrderId::generate(),
    };
    if let Some(status) = &req.status {
        tracing::debug!(%id, %status, "ignoring status in create request");
    }

    let mut order = OrderRecord::new(req.contents);
    order.extra = req.extra;
    state.orders.create_order(id.clone(), order).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            id,
            status: OrderStatus::Pending,
        }),
    ))
}

/// POST /orders/{id}/{action}: cancel or fulfill an order.
#[tracing::instrument(skip(state))]
pub async fn apply_action(
    State(state): State<Arc<AppState>>,
    Path((id, action)): Path<(String, String)>,
) -> Result<Json<OrderActionResponse>, ApiError> {
    let action: OrderAction = action.parse()?;
    let id = OrderId::new(id);

    let status = state.coordinator.apply(&id, action).await?;

    Ok(Json(OrderActionResponse {
        id,
        action: action.as_str(),
        status,
    }))
}
