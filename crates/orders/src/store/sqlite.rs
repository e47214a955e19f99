//! SQLite-backed order store.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{CarId, Money, OrderId, UserId};
use sqlx::{
    Row,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
};

use crate::model::{NewOrder, Order, OrderItem};
use crate::status::OrderStatus;

use super::{OrderStore, StoreError};

/// Order store backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    /// Connects to the database at `url`, creating the file if needed.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Opens a private in-memory database.
    ///
    /// The pool is pinned to one connection that never expires, since
    /// every new connection to `:memory:` would see a fresh database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Creates the orders tables if they do not exist.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                order_date TEXT NOT NULL,
                status TEXT NOT NULL,
                total_amount INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS order_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id INTEGER NOT NULL REFERENCES orders(id),
                car_model_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL,
                unit_price INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_order(row: &SqliteRow) -> Result<Order, StoreError> {
        let status_text: String = row.try_get("status")?;
        let status = OrderStatus::parse(&status_text)
            .ok_or_else(|| StoreError::Corrupt(format!("unknown order status {status_text:?}")))?;

        Ok(Order {
            id: OrderId::new(row.try_get("id")?),
            user_id: UserId::new(row.try_get("user_id")?),
            order_date: row.try_get::<DateTime<Utc>, _>("order_date")?,
            status,
            total_amount: Money::from_minor(row.try_get("total_amount")?),
            items: Vec::new(),
        })
    }

    fn row_to_item(row: &SqliteRow) -> Result<OrderItem, StoreError> {
        Ok(OrderItem {
            id: row.try_get("id")?,
            order_id: OrderId::new(row.try_get("order_id")?),
            car_id: CarId::new(row.try_get("car_model_id")?),
            quantity: row.try_get("quantity")?,
            unit_price: Money::from_minor(row.try_get("unit_price")?),
        })
    }

    async fn load_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_id, car_model_id, quantity, unit_price
            FROM order_items
            WHERE order_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(order_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_item).collect()
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn save(&self, order: NewOrder) -> Result<Order, StoreError> {
        let order_date = Utc::now();
        let mut tx = self.pool.begin().await?;

        let order_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (user_id, order_date, status, total_amount)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(order.user_id.value())
        .bind(order_date)
        .bind(order.status.as_str())
        .bind(order.total_amount.minor())
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(order.items().len());
        for item in order.items() {
            let item_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO order_items (order_id, car_model_id, quantity, unit_price)
                VALUES (?, ?, ?, ?)
                RETURNING id
                "#,
            )
            .bind(order_id)
            .bind(item.car_id.value())
            .bind(item.quantity)
            .bind(item.unit_price.minor())
            .fetch_one(&mut *tx)
            .await?;

            items.push(OrderItem {
                id: item_id,
                order_id: OrderId::new(order_id),
                car_id: item.car_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            });
        }

        tx.commit().await?;

        Ok(Order {
            id: OrderId::new(order_id),
            user_id: order.user_id,
            order_date,
            status: order.status,
            total_amount: order.total_amount,
            items,
        })
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, order_date, status, total_amount
            FROM orders
            WHERE id = ?
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut order = Self::row_to_order(&row)?;
                order.items = self.load_items(order.id).await?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, order_date, status, total_amount
            FROM orders
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut order = Self::row_to_order(row)?;
            order.items = self.load_items(order.id).await?;
            orders.push(order);
        }

        Ok(orders)
    }
}
