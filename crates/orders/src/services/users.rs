//! User directory trait and implementations.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::UserId;

use super::ServiceUnreachable;

/// Trait for checking that an order's user exists.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns true if the user exists, false if it definitely does not.
    /// Errors when the directory cannot answer either way.
    async fn exists(&self, user_id: UserId) -> Result<bool, ServiceUnreachable>;
}

/// User directory backed by the user service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserDirectory {
    /// Creates a directory client against the given service base URL.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn exists(&self, user_id: UserId) -> Result<bool, ServiceUnreachable> {
        let url = format!("{}/api/v1/users/{}", self.base_url, user_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ServiceUnreachable {
                service: "user",
                detail: err.to_string(),
            })?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            status => Err(ServiceUnreachable {
                service: "user",
                detail: format!("unexpected status {status} from {url}"),
            }),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryUserDirectoryState {
    users: HashSet<UserId>,
    fail_on_lookup: bool,
    lookup_count: u64,
}

/// In-memory user directory for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryUserDirectoryState>>,
}

impl InMemoryUserDirectory {
    /// Creates a new in-memory user directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user ID as existing.
    pub fn add_user(&self, user_id: UserId) {
        self.state.write().unwrap().users.insert(user_id);
    }

    /// Configures lookups to fail as unreachable.
    pub fn set_fail_on_lookup(&self, fail: bool) {
        self.state.write().unwrap().fail_on_lookup = fail;
    }

    /// Returns how many lookups were attempted.
    pub fn lookup_count(&self) -> u64 {
        self.state.read().unwrap().lookup_count
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn exists(&self, user_id: UserId) -> Result<bool, ServiceUnreachable> {
        let mut state = self.state.write().unwrap();
        state.lookup_count += 1;

        if state.fail_on_lookup {
            return Err(ServiceUnreachable {
                service: "user",
                detail: "injected failure".to_string(),
            });
        }

        Ok(state.users.contains(&user_id))
    }
}
