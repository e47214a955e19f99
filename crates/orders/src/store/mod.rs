//! Order persistence.
//!
//! The store only ever receives confirmed orders: the orchestrator
//! buffers drafts in memory and calls [`OrderStore::save`] exactly once
//! per accepted order. Rejected orders never reach this layer.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use common::OrderId;
use thiserror::Error;

use crate::model::{NewOrder, Order};

pub use memory::MemoryOrderStore;
pub use sqlite::SqliteOrderStore;

/// Errors from the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Low-level database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store could not complete the operation.
    #[error("order store unavailable: {0}")]
    Unavailable(String),

    /// A persisted row failed to decode.
    #[error("corrupt order row: {0}")]
    Corrupt(String),
}

/// Persistence for order aggregates.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a complete order aggregate atomically, assigning its
    /// order ID, item IDs and order date. Either the order and all of
    /// its items are written, or nothing is.
    async fn save(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// Loads one order with its items.
    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// Loads every order, oldest first.
    async fn list(&self) -> Result<Vec<Order>, StoreError>;
}
