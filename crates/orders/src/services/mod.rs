//! Collaborating services the orchestrator depends on.
//!
//! Each collaborator is a trait with an HTTP implementation for
//! production and an in-memory implementation for tests.

pub mod catalog;
pub mod users;

use thiserror::Error;

pub use catalog::{Availability, Catalog, HttpCatalog, InMemoryCatalog};
pub use users::{HttpUserDirectory, InMemoryUserDirectory, UserDirectory};

/// A collaborator could not be reached or gave an unusable answer.
///
/// The detail is for logs only; API responses never include it.
#[derive(Debug, Error)]
#[error("{service} service unreachable: {detail}")]
pub struct ServiceUnreachable {
    /// Which collaborator failed.
    pub service: &'static str,
    /// Transport or decode detail, log-only.
    pub detail: String,
}
