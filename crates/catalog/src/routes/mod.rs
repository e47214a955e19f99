//! HTTP route handlers.

pub mod cars;
pub mod health;
pub mod inventory;
