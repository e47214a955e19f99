//! Order submission and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{CarId, Money, OrderId, UserId};
use serde::Serialize;

use crate::error::ApiError;
use crate::model::{Order, OrderItem};
use crate::orchestrator::OrderOrchestrator;
use crate::request::RawOrderRequest;
use crate::services::{Catalog, UserDirectory};
use crate::store::OrderStore;

/// Shared application state accessible from all handlers.
pub struct AppState<U, C, S>
where
    U: UserDirectory,
    C: Catalog,
    S: OrderStore,
{
    pub orchestrator: OrderOrchestrator<U, C, S>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub order_date: String,
    pub status: String,
    pub total_amount: Money,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub item_id: i64,
    pub car_model_id: CarId,
    pub quantity: u32,
    pub unit_price: Money,
    pub subtotal: Money,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        let subtotal = item.subtotal();
        Self {
            item_id: item.id,
            car_model_id: item.car_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            user_id: order.user_id,
            order_date: order.order_date.to_rfc3339(),
            status: order.status.to_string(),
            total_amount: order.total_amount,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

// -- Handlers --

/// POST /api/v1/orders — submit a new order.
///
/// Malformed JSON bodies are reported as 400 rather than the extractor
/// default, so every client error on this endpoint looks the same.
#[tracing::instrument(skip(state, payload))]
pub async fn create<U, C, S>(
    State(state): State<Arc<AppState<U, C, S>>>,
    payload: Result<Json<RawOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError>
where
    U: UserDirectory + 'static,
    C: Catalog + 'static,
    S: OrderStore + 'static,
{
    let Json(request) = payload?;
    let order = state.orchestrator.create_order(request).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// GET /api/v1/orders/:id — load one order.
#[tracing::instrument(skip(state))]
pub async fn get<U, C, S>(
    State(state): State<Arc<AppState<U, C, S>>>,
    Path(id): Path<i64>,
) -> Result<Json<OrderResponse>, ApiError>
where
    U: UserDirectory + 'static,
    C: Catalog + 'static,
    S: OrderStore + 'static,
{
    let order = state
        .orchestrator
        .get_order(OrderId::new(id))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok(Json(OrderResponse::from(order)))
}

/// GET /api/v1/orders — list all orders, oldest first.
#[tracing::instrument(skip(state))]
pub async fn list<U, C, S>(
    State(state): State<Arc<AppState<U, C, S>>>,
) -> Result<Json<Vec<OrderResponse>>, ApiError>
where
    U: UserDirectory + 'static,
    C: Catalog + 'static,
    S: OrderStore + 'static,
{
    let orders = state
        .orchestrator
        .list_orders()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
