//! User data model.

use common::UserId;

/// A registered user.
///
/// The password hash stays inside the service; outward responses are
/// built from the other fields only.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
}
