//! In-memory order store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::OrderId;
use tokio::sync::RwLock;

use crate::model::{NewOrder, Order, OrderItem};

use super::{OrderStore, StoreError};

#[derive(Debug, Default)]
struct MemoryState {
    orders: Vec<Order>,
    next_order_id: i64,
    next_item_id: i64,
    fail_on_save: bool,
}

/// Order store held entirely in process memory.
///
/// The default store when no database is configured; also used by
/// tests that need to inject persistence failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryOrderStore {
    /// Creates an empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the next save to fail.
    pub async fn set_fail_on_save(&self, fail: bool) {
        self.state.write().await.fail_on_save = fail;
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn save(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut state = self.state.write().await;

        if state.fail_on_save {
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }

        state.next_order_id += 1;
        let order_id = OrderId::new(state.next_order_id);

        let mut items = Vec::with_capacity(order.items().len());
        for item in order.items() {
            state.next_item_id += 1;
            items.push(OrderItem {
                id: state.next_item_id,
                order_id,
                car_id: item.car_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            });
        }

        let stored = Order {
            id: order_id,
            user_id: order.user_id,
            order_date: Utc::now(),
            status: order.status,
            total_amount: order.total_amount,
            items,
        };
        state.orders.push(stored.clone());

        Ok(stored)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let state = self.state.read().await;
        Ok(state.orders.iter().find(|order| order.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let state = self.state.read().await;
        Ok(state.orders.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{CarId, Money, UserId};

    fn confirmed_order(user: i64) -> NewOrder {
        let mut order = NewOrder::pending(UserId::new(user));
        order.add_item(CarId::new(1), 2, Money::from_minor(1_000));
        order.add_item(CarId::new(2), 1, Money::from_minor(500));
        order.confirm();
        order
    }

    #[tokio::test]
    async fn test_save_assigns_ids_and_date() {
        let store = MemoryOrderStore::new();

        let first = store.save(confirmed_order(1)).await.unwrap();
        let second = store.save(confirmed_order(2)).await.unwrap();

        assert_eq!(first.id, OrderId::new(1));
        assert_eq!(second.id, OrderId::new(2));
        assert_eq!(first.items[0].id, 1);
        assert_eq!(first.items[1].id, 2);
        assert_eq!(second.items[0].id, 3);
        assert!(first.order_date <= Utc::now());
    }

    #[tokio::test]
    async fn test_get_returns_saved_order() {
        let store = MemoryOrderStore::new();
        let saved = store.save(confirmed_order(1)).await.unwrap();

        let loaded = store.get(saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.user_id, UserId::new(1));
        assert_eq!(loaded.total_amount, Money::from_minor(2_500));
        assert_eq!(loaded.items.len(), 2);

        assert!(store.get(OrderId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryOrderStore::new();
        store.save(confirmed_order(1)).await.unwrap();
        store.save(confirmed_order(2)).await.unwrap();

        let orders = store.list().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].user_id, UserId::new(1));
        assert_eq!(orders[1].user_id, UserId::new(2));
    }

    #[tokio::test]
    async fn test_fail_on_save_writes_nothing() {
        let store = MemoryOrderStore::new();
        store.set_fail_on_save(true).await;

        let err = store.save(confirmed_order(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(store.list().await.unwrap().is_empty());
    }
}
