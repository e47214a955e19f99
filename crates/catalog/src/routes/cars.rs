//! Car model endpoints.

use axum::Json;
use axum::extract::{Path, State};
use common::CarId;

use crate::error::CatalogError;
use crate::model::CarModel;
use crate::store::CatalogStore;

/// GET /api/v1/catalog/cars — the full model list.
#[tracing::instrument(skip(store))]
pub async fn list(State(store): State<CatalogStore>) -> Json<Vec<CarModel>> {
    Json(store.list_cars().await)
}

/// GET /api/v1/catalog/cars/{id} — one model by ID.
#[tracing::instrument(skip(store))]
pub async fn get(
    State(store): State<CatalogStore>,
    Path(id): Path<i64>,
) -> Result<Json<CarModel>, CatalogError> {
    let car_id = CarId::new(id);
    let car = store
        .get_car(car_id)
        .await
        .ok_or(CatalogError::UnknownCar(car_id))?;
    Ok(Json(car))
}
