//! Order request validation and coercion.
//!
//! Clients send IDs and quantities either as JSON integers or as numeric
//! strings (`"user_id": "7"` is as valid as `"user_id": 7`). Validation
//! runs before any service is called: a bad request is rejected without
//! a single network round trip.

use common::{CarId, UserId};
use serde::Deserialize;
use thiserror::Error;

/// Raw body of `POST /api/v1/orders`, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderRequest {
    pub user_id: Option<RawNumber>,
    #[serde(default)]
    pub items: Vec<RawOrderItem>,
}

/// One unvalidated order line.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderItem {
    pub car_id: Option<RawNumber>,
    pub quantity: Option<RawNumber>,
}

/// An integer that may arrive as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Text(String),
}

impl RawNumber {
    fn as_i64(&self) -> Option<i64> {
        match self {
            RawNumber::Int(n) => Some(*n),
            RawNumber::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Why a raw request failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `user_id` missing, non-numeric, or not positive.
    #[error("user_id must be a positive integer")]
    InvalidUserId,

    /// `items` missing or empty.
    #[error("order must contain at least one item")]
    NoItems,

    /// An item's `car_id` missing, non-numeric, or not positive.
    #[error("item {index}: car_id must be a positive integer")]
    InvalidCarId { index: usize },

    /// An item's `quantity` non-numeric or not positive.
    #[error("item {index}: quantity must be a positive integer")]
    InvalidQuantity { index: usize },
}

/// A validated order request with coerced IDs and quantities.
///
/// Item order matches the submitted request exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub user_id: UserId,
    pub items: Vec<DraftItem>,
}

/// A validated order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftItem {
    pub car_id: CarId,
    pub quantity: u32,
}

impl RawOrderRequest {
    /// Validates and coerces the request. Fails on the first problem
    /// found; performs no I/O.
    ///
    /// A missing `quantity` defaults to 1.
    pub fn validate(self) -> Result<OrderDraft, ValidationError> {
        let user_id = self
            .user_id
            .as_ref()
            .and_then(RawNumber::as_i64)
            .filter(|id| *id > 0)
            .ok_or(ValidationError::InvalidUserId)?;

        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }

        let mut items = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            let car_id = item
                .car_id
                .as_ref()
                .and_then(RawNumber::as_i64)
                .filter(|id| *id > 0)
                .ok_or(ValidationError::InvalidCarId { index })?;

            let quantity = match &item.quantity {
                None => 1,
                Some(raw) => raw
                    .as_i64()
                    .filter(|q| (1..=i64::from(u32::MAX)).contains(q))
                    .ok_or(ValidationError::InvalidQuantity { index })?
                    as u32,
            };

            items.push(DraftItem {
                car_id: CarId::new(car_id),
                quantity,
            });
        }

        Ok(OrderDraft {
            user_id: UserId::new(user_id),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(body: serde_json::Value) -> RawOrderRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_integer_fields_accepted() {
        let draft = raw(serde_json::json!({
            "user_id": 7,
            "items": [{"car_id": 3, "quantity": 2}]
        }))
        .validate()
        .unwrap();

        assert_eq!(draft.user_id, UserId::new(7));
        assert_eq!(draft.items[0].car_id, CarId::new(3));
        assert_eq!(draft.items[0].quantity, 2);
    }

    #[test]
    fn test_numeric_strings_coerced() {
        let draft = raw(serde_json::json!({
            "user_id": "7",
            "items": [{"car_id": "3", "quantity": " 2 "}]
        }))
        .validate()
        .unwrap();

        assert_eq!(draft.user_id, UserId::new(7));
        assert_eq!(draft.items[0].car_id, CarId::new(3));
        assert_eq!(draft.items[0].quantity, 2);
    }

    #[test]
    fn test_missing_quantity_defaults_to_one() {
        let draft = raw(serde_json::json!({
            "user_id": 1,
            "items": [{"car_id": 5}]
        }))
        .validate()
        .unwrap();

        assert_eq!(draft.items[0].quantity, 1);
    }

    #[test]
    fn test_non_numeric_user_id_rejected() {
        let err = raw(serde_json::json!({
            "user_id": "abc",
            "items": [{"car_id": 1}]
        }))
        .validate()
        .unwrap_err();

        assert_eq!(err, ValidationError::InvalidUserId);
    }

    #[test]
    fn test_missing_user_id_rejected() {
        let err = raw(serde_json::json!({
            "items": [{"car_id": 1}]
        }))
        .validate()
        .unwrap_err();

        assert_eq!(err, ValidationError::InvalidUserId);
    }

    #[test]
    fn test_non_positive_user_id_rejected() {
        for bad in [0, -4] {
            let err = raw(serde_json::json!({
                "user_id": bad,
                "items": [{"car_id": 1}]
            }))
            .validate()
            .unwrap_err();
            assert_eq!(err, ValidationError::InvalidUserId);
        }
    }

    #[test]
    fn test_empty_items_rejected() {
        let err = raw(serde_json::json!({"user_id": 1, "items": []}))
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::NoItems);

        let err = raw(serde_json::json!({"user_id": 1})).validate().unwrap_err();
        assert_eq!(err, ValidationError::NoItems);
    }

    #[test]
    fn test_bad_item_reports_its_index() {
        let err = raw(serde_json::json!({
            "user_id": 1,
            "items": [
                {"car_id": 1, "quantity": 1},
                {"car_id": "not-a-number", "quantity": 1}
            ]
        }))
        .validate()
        .unwrap_err();

        assert_eq!(err, ValidationError::InvalidCarId { index: 1 });
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = raw(serde_json::json!({
            "user_id": 1,
            "items": [{"car_id": 1, "quantity": 0}]
        }))
        .validate()
        .unwrap_err();

        assert_eq!(err, ValidationError::InvalidQuantity { index: 0 });
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let err = raw(serde_json::json!({
            "user_id": 1,
            "items": [{"car_id": 1, "quantity": "-2"}]
        }))
        .validate()
        .unwrap_err();

        assert_eq!(err, ValidationError::InvalidQuantity { index: 0 });
    }

    #[test]
    fn test_item_order_preserved() {
        let draft = raw(serde_json::json!({
            "user_id": 1,
            "items": [{"car_id": 9}, {"car_id": 3}, {"car_id": 7}]
        }))
        .validate()
        .unwrap();

        let ids: Vec<i64> = draft.items.iter().map(|i| i.car_id.value()).collect();
        assert_eq!(ids, vec![9, 3, 7]);
    }
}
