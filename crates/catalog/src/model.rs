//! Catalog data model.

use common::{CarId, Money};
use serde::{Deserialize, Serialize};

/// A car model offered for sale.
///
/// `base_price` is the list price in minor currency units; order
/// totals are computed from it at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarModel {
    pub id: CarId,
    pub model_name: String,
    pub base_price: Money,
    pub description: String,
    /// Free-form technical attributes (motor type, range, seats, ...).
    pub specs: serde_json::Value,
    pub image_url: String,
}

/// Stock held for one model at one dealer location.
///
/// A model's total availability is the sum of its levels across all
/// locations.
#[derive(Debug, Clone)]
pub struct InventoryLevel {
    pub car_id: CarId,
    pub dealer_location: String,
    pub stock_quantity: u32,
}
