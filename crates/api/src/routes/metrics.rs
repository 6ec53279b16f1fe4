//! Prometheus metrics endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use ledger::OrderStatus;
use metrics_exporter_prometheus::PrometheusHandle;

use super::AppState;

/// State of the metrics route: the exporter handle and the ledgers whose
/// sizes are sampled on each scrape.
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
    pub app: Arc<AppState>,
}

/// GET /metrics: returns Prometheus-formatted metrics.
pub async fn get(State(state): State<MetricsState>) -> impl IntoResponse {
    sample_ledger_gauges(&state.app).await;

    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        state.handle.render(),
    )
}

async fn sample_ledger_gauges(app: &AppState) {
    let items = app.inventory.list().await;
    metrics::gauge!("inventory_items").set(items.len() as f64);
    let units: u64 = items.values().map(|item| item.count).fold(0, u64::saturating_add);
    metrics::gauge!("inventory_units").set(units as f64);

    let orders = app.orders.list().await;
    for status in [
        OrderStatus::Pending,
        OrderStatus::Fulfilled,
        OrderStatus::Cancelled,
    ] {
        let n = orders.values().filter(|o| o.status == status).count();
        metrics::gauge!("orders", "status" => status.as_str()).set(n as f64);
    }
}
