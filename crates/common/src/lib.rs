//! Shared types for the dealership services.
//!
//! Every service exchanges the same identifiers and money representation,
//! so they live here rather than in any one service crate.

pub mod ids;
pub mod money;

pub use ids::{CarId, OrderId, UserId};
pub use money::Money;
