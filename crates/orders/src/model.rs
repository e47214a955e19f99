//! Order domain model.

use chrono::{DateTime, Utc};
use common::{CarId, Money, OrderId, UserId};
use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;

/// A persisted order aggregate.
///
/// `total_amount` always equals the sum of the item subtotals; the
/// orchestrator computes it once from the buffered items before the
/// aggregate is saved, and nothing mutates an order afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Money,
    pub items: Vec<OrderItem>,
}

/// One line of a persisted order.
///
/// `unit_price` is the catalog price snapshotted at order time; later
/// catalog changes do not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: OrderId,
    pub car_id: CarId,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderItem {
    /// The line total: unit price times quantity.
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// An order being assembled, before any IDs exist.
///
/// The orchestrator buffers priced items here while its checks run.
/// Either every check passes and the whole draft is persisted in one
/// store call, or the draft is dropped and nothing is written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total_amount: Money,
    items: Vec<NewOrderItem>,
}

/// A priced line buffered in a [`NewOrder`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub car_id: CarId,
    pub quantity: u32,
    pub unit_price: Money,
}

impl NewOrderItem {
    /// The line total: unit price times quantity.
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

impl NewOrder {
    /// Starts an empty pending draft for a user.
    pub fn pending(user_id: UserId) -> Self {
        Self {
            user_id,
            status: OrderStatus::Pending,
            total_amount: Money::zero(),
            items: Vec::new(),
        }
    }

    /// Buffers a priced line. Items keep their insertion order.
    pub fn add_item(&mut self, car_id: CarId, quantity: u32, unit_price: Money) {
        self.items.push(NewOrderItem {
            car_id,
            quantity,
            unit_price,
        });
    }

    /// The buffered lines, in insertion order.
    pub fn items(&self) -> &[NewOrderItem] {
        &self.items
    }

    /// Marks the draft confirmed, recomputing the total from the items
    /// so the total always equals the sum of the line subtotals.
    ///
    /// Only a pending draft moves; anything else is left untouched.
    pub fn confirm(&mut self) {
        if !self.status.can_confirm() {
            return;
        }
        let mut total = Money::zero();
        for item in &self.items {
            total += item.subtotal();
        }
        self.total_amount = total;
        self.status = OrderStatus::Confirmed;
    }
}
