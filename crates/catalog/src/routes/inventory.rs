//! Inventory availability endpoint.

use axum::Json;
use axum::extract::State;
use common::CarId;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::store::CatalogStore;

#[derive(Debug, Deserialize)]
pub struct InventoryCheckRequest {
    pub car_id: Option<CarId>,
    pub quantity: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct InventoryCheckResponse {
    pub car_id: CarId,
    pub is_available: bool,
    pub available_stock: u32,
    pub required: u32,
}

/// POST /api/v1/inventory/check — report whether the requested quantity
/// of a model is in stock anywhere.
///
/// `quantity` defaults to 1. An unknown `car_id` is not an error: it
/// reports zero available stock.
#[tracing::instrument(skip(store))]
pub async fn check(
    State(store): State<CatalogStore>,
    Json(req): Json<InventoryCheckRequest>,
) -> Result<Json<InventoryCheckResponse>, CatalogError> {
    let car_id = req.car_id.ok_or(CatalogError::MissingField("car_id"))?;
    let required = req.quantity.unwrap_or(1);

    let available_stock = store.available_stock(car_id).await;
    let is_available = available_stock >= required;

    tracing::debug!(%car_id, required, available_stock, is_available, "inventory check");

    Ok(Json(InventoryCheckResponse {
        car_id,
        is_available,
        available_stock,
        required,
    }))
}
