//! Order orchestration.
//!
//! The orchestrator drives one order submission end to end: validate
//! the raw request, confirm the user exists, then check stock and
//! snapshot a price for each item in submission order. Priced items
//! are buffered in a draft; nothing touches the store until every
//! check has passed, so a rejected order leaves no trace. The single
//! store call at the end persists the whole aggregate atomically.

use common::OrderId;

use crate::model::{NewOrder, Order};
use crate::rejection::OrderRejection;
use crate::request::RawOrderRequest;
use crate::services::{Catalog, UserDirectory};
use crate::store::{OrderStore, StoreError};

const STEP_VALIDATE: &str = "validate";
const STEP_CHECK_USER: &str = "check_user";
const STEP_PRICE_ITEMS: &str = "price_items";
const STEP_COMMIT: &str = "commit";

/// Coordinates the user directory, the catalog and the order store to
/// turn raw order requests into confirmed orders.
pub struct OrderOrchestrator<U, C, S>
where
    U: UserDirectory,
    C: Catalog,
    S: OrderStore,
{
    users: U,
    catalog: C,
    store: S,
}

impl<U, C, S> OrderOrchestrator<U, C, S>
where
    U: UserDirectory,
    C: Catalog,
    S: OrderStore,
{
    /// Creates a new orchestrator over the given collaborators.
    pub fn new(users: U, catalog: C, store: S) -> Self {
        Self {
            users,
            catalog,
            store,
        }
    }

    /// Processes one order submission.
    ///
    /// Returns the persisted confirmed order, or the first rejection
    /// encountered. Rejections write nothing.
    #[tracing::instrument(skip(self, request))]
    pub async fn create_order(&self, request: RawOrderRequest) -> Result<Order, OrderRejection> {
        metrics::counter!("order_requests_total").increment(1);
        let started = std::time::Instant::now();

        let result = self.run_create(request).await;

        match &result {
            Ok(order) => {
                metrics::counter!("orders_confirmed_total").increment(1);
                tracing::info!(
                    order_id = %order.id,
                    total_amount = %order.total_amount,
                    "order confirmed"
                );
            }
            Err(rejection) => {
                metrics::counter!("orders_rejected_total", "reason" => rejection.reason())
                    .increment(1);
                tracing::warn!(
                    reason = rejection.reason(),
                    detail = %rejection,
                    "order rejected"
                );
            }
        }
        metrics::histogram!("order_create_duration_seconds").record(started.elapsed().as_secs_f64());

        result
    }

    async fn run_create(&self, request: RawOrderRequest) -> Result<Order, OrderRejection> {
        // 1. Validate and coerce. No network calls before this passes.
        let draft = request.validate()?;
        tracing::debug!(
            step = STEP_VALIDATE,
            user_id = %draft.user_id,
            items = draft.items.len(),
            "request validated"
        );

        // 2. The user must exist. An unreachable directory fails closed:
        //    an order for an unverifiable user is not accepted.
        tracing::info!(step = STEP_CHECK_USER, user_id = %draft.user_id, "verifying user");
        match self.users.exists(draft.user_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(OrderRejection::UserInvalid {
                    user_id: draft.user_id,
                });
            }
            Err(err) => {
                tracing::warn!(
                    step = STEP_CHECK_USER,
                    error = %err,
                    "user directory unreachable, failing closed"
                );
                return Err(OrderRejection::UserInvalid {
                    user_id: draft.user_id,
                });
            }
        }

        // 3. Check stock and snapshot a unit price per item, in the
        //    order submitted, buffering priced lines in the draft.
        let mut order = NewOrder::pending(draft.user_id);
        for item in &draft.items {
            tracing::info!(
                step = STEP_PRICE_ITEMS,
                car_id = %item.car_id,
                quantity = item.quantity,
                "checking item"
            );

            let availability = self
                .catalog
                .check_availability(item.car_id, item.quantity)
                .await
                .map_err(|err| {
                    tracing::warn!(step = STEP_PRICE_ITEMS, error = %err, "availability check failed");
                    OrderRejection::CatalogUnreachable { car_id: item.car_id }
                })?;

            if !availability.available {
                return Err(OrderRejection::InsufficientInventory {
                    car_id: item.car_id,
                    requested: item.quantity,
                    available: availability.stock_on_hand,
                });
            }

            let unit_price = match self.catalog.unit_price(item.car_id).await {
                Ok(Some(price)) => price,
                Ok(None) => {
                    return Err(OrderRejection::PricingUnavailable {
                        car_id: item.car_id,
                    });
                }
                Err(err) => {
                    tracing::warn!(step = STEP_PRICE_ITEMS, error = %err, "price lookup failed");
                    return Err(OrderRejection::PricingUnavailable {
                        car_id: item.car_id,
                    });
                }
            };

            order.add_item(item.car_id, item.quantity, unit_price);
        }

        // 4. Every check passed: confirm the draft and write the whole
        //    aggregate in one store call.
        order.confirm();
        tracing::info!(
            step = STEP_COMMIT,
            user_id = %order.user_id,
            items = order.items().len(),
            total_amount = %order.total_amount,
            "persisting confirmed order"
        );
        let saved = self.store.save(order).await?;

        Ok(saved)
    }

    /// Loads one order.
    pub async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        self.store.get(id).await
    }

    /// Loads every order, oldest first.
    pub async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.store.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ValidationError;
    use crate::services::{InMemoryCatalog, InMemoryUserDirectory};
    use crate::store::MemoryOrderStore;
    use crate::status::OrderStatus;
    use common::{CarId, Money, UserId};

    fn setup() -> (
        OrderOrchestrator<InMemoryUserDirectory, InMemoryCatalog, MemoryOrderStore>,
        InMemoryUserDirectory,
        InMemoryCatalog,
        MemoryOrderStore,
    ) {
        let users = InMemoryUserDirectory::new();
        let catalog = InMemoryCatalog::new();
        let store = MemoryOrderStore::new();
        let orchestrator = OrderOrchestrator::new(users.clone(), catalog.clone(), store.clone());
        (orchestrator, users, catalog, store)
    }

    fn request(user_id: i64, items: &[(i64, u32)]) -> RawOrderRequest {
        let items: Vec<_> = items
            .iter()
            .map(|(car_id, quantity)| {
                serde_json::json!({ "car_id": car_id, "quantity": quantity })
            })
            .collect();
        serde_json::from_value(serde_json::json!({ "user_id": user_id, "items": items })).unwrap()
    }

    #[tokio::test]
    async fn test_happy_path() {
        let (orchestrator, users, catalog, store) = setup();
        users.add_user(UserId::new(1));
        catalog.add_car(CarId::new(1), Money::from_minor(1_000), 5);
        catalog.add_car(CarId::new(2), Money::from_minor(2_500), 5);

        let order = orchestrator
            .create_order(request(1, &[(1, 2), (2, 1)]))
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.total_amount, Money::from_minor(4_500));
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].subtotal(), Money::from_minor(2_000));

        // One user lookup, one availability check and one price per item.
        assert_eq!(users.lookup_count(), 1);
        assert_eq!(catalog.availability_count(), 2);
        assert_eq!(catalog.price_count(), 2);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_calls() {
        let (orchestrator, users, catalog, store) = setup();
        users.add_user(UserId::new(1));

        let raw: RawOrderRequest =
            serde_json::from_value(serde_json::json!({ "user_id": "abc", "items": [{"car_id": 1}] }))
                .unwrap();
        let rejection = orchestrator.create_order(raw).await.unwrap_err();

        assert!(matches!(
            rejection,
            OrderRejection::Validation(ValidationError::InvalidUserId)
        ));
        assert_eq!(users.lookup_count(), 0);
        assert_eq!(catalog.availability_count(), 0);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_rejected_before_catalog() {
        let (orchestrator, _users, catalog, store) = setup();
        catalog.add_car(CarId::new(1), Money::from_minor(1_000), 5);

        let rejection = orchestrator
            .create_order(request(7, &[(1, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            rejection,
            OrderRejection::UserInvalid { user_id } if user_id == UserId::new(7)
        ));
        assert_eq!(catalog.availability_count(), 0);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_directory_outage_fails_closed() {
        let (orchestrator, users, catalog, store) = setup();
        users.add_user(UserId::new(1));
        users.set_fail_on_lookup(true);
        catalog.add_car(CarId::new(1), Money::from_minor(1_000), 5);

        let rejection = orchestrator
            .create_order(request(1, &[(1, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(rejection, OrderRejection::UserInvalid { .. }));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_stock_reports_levels() {
        let (orchestrator, users, catalog, store) = setup();
        users.add_user(UserId::new(1));
        catalog.add_car(CarId::new(3), Money::from_minor(1_000), 1);

        let rejection = orchestrator
            .create_order(request(1, &[(3, 2)]))
            .await
            .unwrap_err();

        match rejection {
            OrderRejection::InsufficientInventory {
                car_id,
                requested,
                available,
            } => {
                assert_eq!(car_id, CarId::new(3));
                assert_eq!(requested, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected InsufficientInventory, got {other:?}"),
        }

        // The availability check failed, so no price was ever fetched.
        assert_eq!(catalog.price_count(), 0);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_outage_rejects_as_unreachable() {
        let (orchestrator, users, catalog, store) = setup();
        users.add_user(UserId::new(1));
        catalog.add_car(CarId::new(1), Money::from_minor(1_000), 5);
        catalog.set_fail_on_availability(true);

        let rejection = orchestrator
            .create_order(request(1, &[(1, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            rejection,
            OrderRejection::CatalogUnreachable { car_id } if car_id == CarId::new(1)
        ));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unpriced_item_mid_order_writes_nothing() {
        let (orchestrator, users, catalog, store) = setup();
        users.add_user(UserId::new(1));
        catalog.add_car(CarId::new(1), Money::from_minor(1_000), 5);
        catalog.add_car(CarId::new(2), Money::from_minor(2_000), 5);
        catalog.remove_price(CarId::new(2));

        let rejection = orchestrator
            .create_order(request(1, &[(1, 1), (2, 1)]))
            .await
            .unwrap_err();

        // Item 1 was already priced and buffered; the failure on item 2
        // still discards the whole draft.
        assert!(matches!(
            rejection,
            OrderRejection::PricingUnavailable { car_id } if car_id == CarId::new(2)
        ));
        assert_eq!(catalog.price_count(), 2);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_price_lookup_outage_rejects_order() {
        let (orchestrator, users, catalog, store) = setup();
        users.add_user(UserId::new(1));
        catalog.add_car(CarId::new(1), Money::from_minor(1_000), 5);
        catalog.set_fail_on_price(true);

        let rejection = orchestrator
            .create_order(request(1, &[(1, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            rejection,
            OrderRejection::PricingUnavailable { .. }
        ));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_persistence() {
        let (orchestrator, users, catalog, store) = setup();
        users.add_user(UserId::new(1));
        catalog.add_car(CarId::new(1), Money::from_minor(1_000), 5);
        store.set_fail_on_save(true).await;

        let rejection = orchestrator
            .create_order(request(1, &[(1, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(rejection, OrderRejection::Persistence(_)));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_and_list_orders() {
        let (orchestrator, users, catalog, _store) = setup();
        users.add_user(UserId::new(1));
        catalog.add_car(CarId::new(1), Money::from_minor(1_000), 5);

        let created = orchestrator
            .create_order(request(1, &[(1, 1)]))
            .await
            .unwrap();

        let loaded = orchestrator.get_order(created.id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
        assert!(orchestrator
            .get_order(OrderId::new(99))
            .await
            .unwrap()
            .is_none());
        assert_eq!(orchestrator.list_orders().await.unwrap().len(), 1);
    }
}
