//! Prometheus metrics endpoint.
//!
//! The order flow records four series: `order_requests_total`,
//! `orders_confirmed_total`, `orders_rejected_total` (labeled by
//! rejection `reason`) and the `order_create_duration_seconds`
//! histogram. This handler renders whatever the installed recorder
//! has gathered so far.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

/// GET /metrics — renders gathered metrics in the Prometheus text
/// exposition format.
pub async fn render(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        handle.render(),
    )
}
