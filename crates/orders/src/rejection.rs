//! Reasons an order submission can be turned away.

use common::{CarId, UserId};
use thiserror::Error;

use crate::request::ValidationError;
use crate::store::StoreError;

/// Why an order was rejected instead of confirmed.
///
/// Every variant maps to exactly one HTTP status in the API layer, so
/// callers can tell a bad request apart from a missing user, a stock
/// shortage, an unreachable collaborator and a persistence failure.
#[derive(Debug, Error)]
pub enum OrderRejection {
    /// The request payload failed validation before any lookup ran.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The user does not exist, or the user service could not confirm
    /// that it does. Unreachability fails closed into this variant.
    #[error("user {user_id} does not exist or could not be verified")]
    UserInvalid { user_id: UserId },

    /// The catalog reported less stock than the order needs.
    #[error(
        "car model {car_id} has insufficient stock: requested {requested}, available {available}"
    )]
    InsufficientInventory {
        car_id: CarId,
        requested: u32,
        available: u32,
    },

    /// The availability check could not be performed at all.
    #[error("catalog service unreachable while checking car model {car_id}")]
    CatalogUnreachable { car_id: CarId },

    /// No unit price could be obtained for a car model.
    #[error("no price available for car model {car_id}")]
    PricingUnavailable { car_id: CarId },

    /// The confirmed order could not be written.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl OrderRejection {
    /// Stable label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            OrderRejection::Validation(_) => "validation",
            OrderRejection::UserInvalid { .. } => "user_invalid",
            OrderRejection::InsufficientInventory { .. } => "insufficient_inventory",
            OrderRejection::CatalogUnreachable { .. } => "catalog_unreachable",
            OrderRejection::PricingUnavailable { .. } => "pricing_unavailable",
            OrderRejection::Persistence(_) => "persistence",
        }
    }
}
