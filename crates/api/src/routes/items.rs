//! Inventory item endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::ItemName;
use ledger::ItemRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AppState;
use crate::error::ApiError;

// -- Request types --

/// Body of `POST /items`.
///
/// Missing fields take the item form defaults: empty type
/// and description, a count of one. Any other key is passed through to the
/// ledger, which rejects it.
#[derive(Deserialize)]
pub struct CreateItemRequest {
    /// Missing or blank names are refused with 400.
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default = "default_count")]
    pub count: u64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn default_count() -> u64 {
    1
}

/// Body of `PUT /items/{name}`.
#[derive(Deserialize)]
pub struct AdjustCountRequest {
    #[serde(default = "default_adjustment")]
    pub count: i64,
}

fn default_adjustment() -> i64 {
    1
}

/// Query of `GET /counts`.
#[derive(Deserialize)]
pub struct CountsQuery {
    /// Comma-separated item names.
    pub names: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct ItemCreatedResponse {
    pub name: ItemName,
    pub item: ItemRecord,
}

#[derive(Serialize)]
pub struct AdjustCountResponse {
    pub name: ItemName,
    pub count: u64,
    pub message: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct CountsResponse {
    pub names: Vec<ItemName>,
    pub counts: Vec<u64>,
}

// -- Handlers --

/// GET /items: every item keyed by name.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Json<BTreeMap<ItemName, ItemRecord>> {
    Json(state.inventory.list().await)
}

/// GET /items/{name}: a single item.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ItemRecord>, ApiError> {
    let item = state.inventory.get(&ItemName::new(name)).await?;
    Ok(Json(item))
}

/// POST /items: add a new item.
#[tracing::instrument(skip(state, req), fields(name = %req.name))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemCreatedResponse>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Item needs a name".to_string()));
    }

    let name = ItemName::new(req.name);
    let mut item = ItemRecord::new(req.item_type, req.description, req.count);
    item.extra = req.extra;

    state.inventory.add_item(name.clone(), item.clone()).await?;

    Ok((StatusCode::CREATED, Json(ItemCreatedResponse { name, item })))
}

/// PUT /items/{name}: stock (positive count) or take (negative count).
#[tracing::instrument(skip(state, req), fields(delta = req.count))]
pub async fn adjust(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<AdjustCountRequest>,
) -> Result<Json<AdjustCountResponse>, ApiError> {
    let name = ItemName::new(name);
    let count = state.inventory.adjust_count(&name, req.count).await?;

    let message = if req.count >= 0 {
        format!("Added {} items to {name}!", req.count)
    } else {
        format!("Took {} items from {name}!", req.count.unsigned_abs())
    };

    Ok(Json(AdjustCountResponse {
        name,
        count,
        message,
    }))
}

/// DELETE /items/{name}: remove an item.
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let name = ItemName::new(name);
    state.inventory.delete(&name).await?;
    Ok(Json(MessageResponse {
        message: format!("Deleted {name}"),
    }))
}

/// GET /counts?names=a,b,c: stock counts of several items, in the order asked.
#[tracing::instrument(skip(state, query), fields(names = %query.names))]
pub async fn counts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CountsQuery>,
) -> Result<Json<CountsResponse>, ApiError> {
    let names = parse_name_list(&query.names);
    let counts = state.inventory.query_counts(&names).await?;
    Ok(Json(CountsResponse { names, counts }))
}

/// Splits a comma-separated list of item names.
///
/// Only the list as a whole is trimmed; names keep their inner whitespace.
pub fn parse_name_list(raw: &str) -> Vec<ItemName> {
    raw.trim().split(',').map(ItemName::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_list() {
        let names = parse_name_list("  sim,modem,antenna \n");
        assert_eq!(
            names,
            vec![
                ItemName::new("sim"),
                ItemName::new("modem"),
                ItemName::new("antenna")
            ]
        );
    }

    #[test]
    fn test_parse_single_name() {
        assert_eq!(parse_name_list("sim"), vec![ItemName::new("sim")]);
    }

    #[test]
    fn test_parse_keeps_empty_entries() {
        assert_eq!(
            parse_name_list("a,,b"),
            vec![ItemName::new("a"), ItemName::new(""), ItemName::new("b")]
        );
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateItemRequest = serde_json::from_str(r#"{"name": "sim"}"#).unwrap();
        assert_eq!(req.item_type, "");
        assert_eq!(req.description, "");
        assert_eq!(req.count, 1);
        assert!(req.extra.is_empty());
    }

    #[test]
    fn test_create_request_accepts_desc_alias_and_collects_extras() {
        let req: CreateItemRequest = serde_json::from_str(
            r#"{"name": "sim", "type": "part", "desc": "SIM card", "count": 4, "price": 2}"#,
        )
        .unwrap();
        assert_eq!(req.item_type, "part");
        assert_eq!(req.description, "SIM card");
        assert_eq!(req.count, 4);
        assert_eq!(req.extra.keys().collect::<Vec<_>>(), vec!["price"]);
    }
}
