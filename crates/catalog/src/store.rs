//! In-memory catalog store with demo seed data.

use std::sync::Arc;

use common::{CarId, Money};
use tokio::sync::RwLock;

use crate::model::{CarModel, InventoryLevel};

#[derive(Default)]
struct CatalogState {
    cars: Vec<CarModel>,
    inventory: Vec<InventoryLevel>,
    next_car_id: i64,
}

/// Thread-safe in-memory catalog.
///
/// The deployment resets catalog data on every boot, so there is no
/// durable backing store; [`CatalogStore::seed_demo_data`] populates it
/// before the listener starts accepting traffic.
#[derive(Clone)]
pub struct CatalogStore {
    state: Arc<RwLock<CatalogState>>,
}

impl CatalogStore {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(CatalogState {
                cars: Vec::new(),
                inventory: Vec::new(),
                next_car_id: 1,
            })),
        }
    }

    /// Adds a model with its per-location stock levels and returns the
    /// assigned ID.
    pub async fn add_model(
        &self,
        model_name: impl Into<String>,
        base_price: Money,
        description: impl Into<String>,
        specs: serde_json::Value,
        image_url: impl Into<String>,
        stock: &[(&str, u32)],
    ) -> CarId {
        let mut state = self.state.write().await;
        let id = CarId::new(state.next_car_id);
        state.next_car_id += 1;

        state.cars.push(CarModel {
            id,
            model_name: model_name.into(),
            base_price,
            description: description.into(),
            specs,
            image_url: image_url.into(),
        });
        for (location, quantity) in stock {
            state.inventory.push(InventoryLevel {
                car_id: id,
                dealer_location: (*location).to_string(),
                stock_quantity: *quantity,
            });
        }
        id
    }

    /// Returns all models in insertion order.
    pub async fn list_cars(&self) -> Vec<CarModel> {
        self.state.read().await.cars.clone()
    }

    /// Returns one model, if it exists.
    pub async fn get_car(&self, id: CarId) -> Option<CarModel> {
        self.state
            .read()
            .await
            .cars
            .iter()
            .find(|car| car.id == id)
            .cloned()
    }

    /// Total stock for a model summed across dealer locations.
    ///
    /// An unknown model simply sums to zero; callers cannot distinguish
    /// "does not exist" from "out of stock" here.
    pub async fn available_stock(&self, id: CarId) -> u32 {
        self.state
            .read()
            .await
            .inventory
            .iter()
            .filter(|level| level.car_id == id)
            .map(|level| level.stock_quantity)
            .sum()
    }

    /// Populates the catalog with the demo lineup.
    pub async fn seed_demo_data(&self) {
        let lineup: [(&str, i64, &str, serde_json::Value, &str, [(&str, u32); 2]); 8] = [
            (
                "Summit 9",
                6_890_000,
                "Full-size electric SUV, 7 seats. Flagship of the lineup.",
                serde_json::json!({"motor_type": "Electric", "range_km": 438, "seats": 7}),
                "/images/summit-9.jpg",
                [("Downtown", 5), ("Riverside", 10)],
            ),
            (
                "Summit 8",
                5_275_000,
                "Mid-size electric SUV, 5 seats. The global volume model.",
                serde_json::json!({"motor_type": "Electric", "range_km": 420, "seats": 5}),
                "/images/summit-8.jpg",
                [("Downtown", 15), ("Riverside", 30)],
            ),
            (
                "Meridian 7",
                4_190_000,
                "Compact electric SUV with a coupe roofline.",
                serde_json::json!({"motor_type": "Electric", "range_km": 400, "seats": 5}),
                "/images/meridian-7.jpg",
                [("Downtown", 20), ("Riverside", 25)],
            ),
            (
                "Meridian 6",
                3_250_000,
                "Compact electric SUV, agile and affordable.",
                serde_json::json!({"motor_type": "Electric", "range_km": 399, "seats": 5}),
                "/images/meridian-6.jpg",
                [("Downtown", 30), ("Riverside", 20)],
            ),
            (
                "Aurora Plus",
                2_199_900,
                "Subcompact electric crossover for the city.",
                serde_json::json!({"motor_type": "Electric", "range_km": 326, "seats": 5}),
                "/images/aurora-plus.jpg",
                [("Downtown", 40), ("Riverside", 50)],
            ),
            (
                "Lux A 2.0",
                4_450_000,
                "Executive gasoline sedan with a turbocharged engine.",
                serde_json::json!({"motor_type": "Gasoline", "engine": "2.0L turbo", "seats": 5}),
                "/images/lux-a-20.jpg",
                [("Downtown", 10), ("Riverside", 5)],
            ),
            (
                "Lux SA 2.0",
                5_950_000,
                "Executive gasoline SUV, powerful and spacious.",
                serde_json::json!({"motor_type": "Gasoline", "engine": "2.0L turbo", "seats": 7}),
                "/images/lux-sa-20.jpg",
                [("Downtown", 10), ("Riverside", 5)],
            ),
            (
                "Dart 1.4",
                1_595_000,
                "City hatchback, small and practical.",
                serde_json::json!({"motor_type": "Gasoline", "engine": "1.4L", "seats": 5}),
                "/images/dart-14.jpg",
                [("Downtown", 20), ("Riverside", 15)],
            ),
        ];

        for (name, price, description, specs, image, stock) in lineup {
            self.add_model(
                name,
                Money::from_minor(price),
                description,
                specs,
                image,
                &stock,
            )
            .await;
        }

        tracing::info!(models = 8, "seeded demo catalog");
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
