//! Catalog service trait and implementations.
//!
//! The catalog answers two questions per order line: is there enough
//! stock, and what does one unit cost. They are separate calls against
//! the catalog service, matching its HTTP surface.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{CarId, Money};
use serde::Deserialize;

use super::ServiceUnreachable;

/// Stock answer for one car model.
#[derive(Debug, Clone)]
pub struct Availability {
    /// Whether the requested quantity can be fulfilled.
    pub available: bool,
    /// Units currently on hand across all dealer locations.
    pub stock_on_hand: u32,
}

/// Trait for catalog lookups.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Checks whether `quantity` units of a car model are in stock.
    async fn check_availability(
        &self,
        car_id: CarId,
        quantity: u32,
    ) -> Result<Availability, ServiceUnreachable>;

    /// Returns the current unit price of a car model, or `None` if the
    /// catalog has no such model.
    async fn unit_price(&self, car_id: CarId) -> Result<Option<Money>, ServiceUnreachable>;
}

#[derive(Debug, Deserialize)]
struct InventoryCheckResponse {
    is_available: bool,
    available_stock: u32,
}

#[derive(Debug, Deserialize)]
struct CarPriceResponse {
    base_price: Money,
}

/// Catalog backed by the catalog service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a catalog client against the given service base URL.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn unreachable(detail: String) -> ServiceUnreachable {
        ServiceUnreachable {
            service: "catalog",
            detail,
        }
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn check_availability(
        &self,
        car_id: CarId,
        quantity: u32,
    ) -> Result<Availability, ServiceUnreachable> {
        let url = format!("{}/api/v1/inventory/check", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "car_id": car_id, "quantity": quantity }))
            .send()
            .await
            .map_err(|err| Self::unreachable(err.to_string()))?;

        // A non-200 answer means the catalog could not vouch for stock.
        if response.status() != reqwest::StatusCode::OK {
            return Ok(Availability {
                available: false,
                stock_on_hand: 0,
            });
        }

        let body: InventoryCheckResponse = response
            .json()
            .await
            .map_err(|err| Self::unreachable(format!("bad inventory response: {err}")))?;

        Ok(Availability {
            available: body.is_available,
            stock_on_hand: body.available_stock,
        })
    }

    async fn unit_price(&self, car_id: CarId) -> Result<Option<Money>, ServiceUnreachable> {
        let url = format!("{}/api/v1/catalog/cars/{}", self.base_url, car_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| Self::unreachable(err.to_string()))?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let body: CarPriceResponse = response
                    .json()
                    .await
                    .map_err(|err| Self::unreachable(format!("bad car response: {err}")))?;
                Ok(Some(body.base_price))
            }
            reqwest::StatusCode::NOT_FOUND => Ok(None),
            status => Err(Self::unreachable(format!(
                "unexpected status {status} from {url}"
            ))),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    stock: HashMap<CarId, u32>,
    prices: HashMap<CarId, Money>,
    fail_on_availability: bool,
    fail_on_price: bool,
    availability_count: u64,
    price_count: u64,
}

/// In-memory catalog for testing.
///
/// Stock is never decremented by lookups; it only changes through
/// [`set_stock`](InMemoryCatalog::set_stock).
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalog {
    /// Creates a new in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a car model with a price and an initial stock level.
    pub fn add_car(&self, car_id: CarId, price: Money, stock: u32) {
        let mut state = self.state.write().unwrap();
        state.prices.insert(car_id, price);
        state.stock.insert(car_id, stock);
    }

    /// Overwrites the stock level of a car model.
    pub fn set_stock(&self, car_id: CarId, stock: u32) {
        self.state.write().unwrap().stock.insert(car_id, stock);
    }

    /// Overwrites the price of a car model.
    pub fn set_price(&self, car_id: CarId, price: Money) {
        self.state.write().unwrap().prices.insert(car_id, price);
    }

    /// Removes the price of a car model, leaving any stock in place.
    pub fn remove_price(&self, car_id: CarId) {
        self.state.write().unwrap().prices.remove(&car_id);
    }

    /// Configures availability checks to fail as unreachable.
    pub fn set_fail_on_availability(&self, fail: bool) {
        self.state.write().unwrap().fail_on_availability = fail;
    }

    /// Configures price lookups to fail as unreachable.
    pub fn set_fail_on_price(&self, fail: bool) {
        self.state.write().unwrap().fail_on_price = fail;
    }

    /// Returns how many availability checks were attempted.
    pub fn availability_count(&self) -> u64 {
        self.state.read().unwrap().availability_count
    }

    /// Returns how many price lookups were attempted.
    pub fn price_count(&self) -> u64 {
        self.state.read().unwrap().price_count
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn check_availability(
        &self,
        car_id: CarId,
        quantity: u32,
    ) -> Result<Availability, ServiceUnreachable> {
        let mut state = self.state.write().unwrap();
        state.availability_count += 1;

        if state.fail_on_availability {
            return Err(ServiceUnreachable {
                service: "catalog",
                detail: "injected failure".to_string(),
            });
        }

        // Unknown car models report zero stock rather than an error.
        let stock_on_hand = state.stock.get(&car_id).copied().unwrap_or(0);
        Ok(Availability {
            available: stock_on_hand >= quantity,
            stock_on_hand,
        })
    }

    async fn unit_price(&self, car_id: CarId) -> Result<Option<Money>, ServiceUnreachable> {
        let mut state = self.state.write().unwrap();
        state.price_count += 1;

        if state.fail_on_price {
            return Err(ServiceUnreachable {
                service: "catalog",
                detail: "injected failure".to_string(),
            });
        }

        Ok(state.prices.get(&car_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_availability_against_stock() {
        let catalog = InMemoryCatalog::new();
        catalog.add_car(CarId::new(1), Money::from_minor(1_595_000), 3);

        let ok = catalog.check_availability(CarId::new(1), 3).await.unwrap();
        assert!(ok.available);
        assert_eq!(ok.stock_on_hand, 3);

        let short = catalog.check_availability(CarId::new(1), 4).await.unwrap();
        assert!(!short.available);
        assert_eq!(short.stock_on_hand, 3);
    }

    #[tokio::test]
    async fn test_unknown_car_reports_zero_stock() {
        let catalog = InMemoryCatalog::new();

        let availability = catalog.check_availability(CarId::new(99), 1).await.unwrap();
        assert!(!availability.available);
        assert_eq!(availability.stock_on_hand, 0);
        assert_eq!(catalog.unit_price(CarId::new(99)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let catalog = InMemoryCatalog::new();
        catalog.add_car(CarId::new(1), Money::from_minor(100), 1);
        catalog.set_fail_on_availability(true);
        catalog.set_fail_on_price(true);

        assert!(catalog.check_availability(CarId::new(1), 1).await.is_err());
        assert!(catalog.unit_price(CarId::new(1)).await.is_err());
        assert_eq!(catalog.availability_count(), 1);
        assert_eq!(catalog.price_count(), 1);
    }
}
