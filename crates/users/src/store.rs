//! In-memory user store with demo seed data.

use std::sync::Arc;

use common::UserId;
use tokio::sync::RwLock;

use crate::auth;
use crate::error::UserError;
use crate::model::User;

#[derive(Default)]
struct UserState {
    users: Vec<User>,
    next_user_id: i64,
}

/// Thread-safe in-memory user directory.
///
/// Reset and reseeded on every boot; registration assigns sequential IDs
/// after the seeds, so the demo users always occupy IDs 1 through 4.
#[derive(Clone)]
pub struct UserStore {
    state: Arc<RwLock<UserState>>,
}

impl UserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(UserState {
                users: Vec::new(),
                next_user_id: 1,
            })),
        }
    }

    /// Inserts a user with an already-hashed password.
    ///
    /// Fails if the email is taken. Email comparison is exact, matching
    /// the unique-column behavior it replaces.
    pub async fn insert(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        password_hash: String,
    ) -> Result<UserId, UserError> {
        let email = email.into();
        let mut state = self.state.write().await;

        if state.users.iter().any(|user| user.email == email) {
            return Err(UserError::DuplicateEmail(email));
        }

        let id = UserId::new(state.next_user_id);
        state.next_user_id += 1;
        state.users.push(User {
            id,
            name: name.into(),
            email,
            role: role.into(),
            password_hash,
        });
        Ok(id)
    }

    /// Returns one user by ID, if registered.
    pub async fn get(&self, id: UserId) -> Option<User> {
        self.state
            .read()
            .await
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    /// Returns one user by email, if registered.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.state
            .read()
            .await
            .users
            .iter()
            .find(|user| user.email == email)
            .cloned()
    }

    /// Seeds the fixed admin account plus three demo customers.
    pub async fn seed_demo_users(&self) -> Result<(), UserError> {
        self.insert(
            "Dealership Admin",
            "admin@dealership.com",
            "admin",
            auth::hash_password("123456")?,
        )
        .await?;

        for i in 1..=3 {
            self.insert(
                format!("Demo Customer {i}"),
                format!("user{i}@test.com"),
                "customer",
                auth::hash_password("password")?,
            )
            .await?;
        }

        tracing::info!(users = 4, "seeded demo users");
        Ok(())
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
