//! Request forwarding.
//!
//! The first path segment names the target service; the rest of the
//! path is appended to that service's versioned API prefix, so gateway
//! `/catalog/catalog/cars/1` reaches the catalog service at
//! `/api/v1/catalog/cars/1`. Method, query string, body and
//! `Content-Type` travel through unchanged, and the upstream status
//! and body come back verbatim.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method, header};
use axum::response::{IntoResponse, Response};

use crate::config::Config;
use crate::error::GatewayError;

/// Shared gateway state: one HTTP client and the routing table.
pub struct GatewayState {
    pub client: reqwest::Client,
    pub targets: ServiceTargets,
}

/// Maps service path prefixes to backend base URLs.
#[derive(Debug, Clone)]
pub struct ServiceTargets {
    users: String,
    catalog: String,
    orders: String,
}

impl ServiceTargets {
    /// Builds the routing table from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            users: config.user_service_url.clone(),
            catalog: config.catalog_service_url.clone(),
            orders: config.order_service_url.clone(),
        }
    }

    /// The backend base URL for a service prefix, if it is routable.
    pub fn resolve(&self, service: &str) -> Option<&str> {
        match service {
            "users" => Some(&self.users),
            "catalog" => Some(&self.catalog),
            "orders" => Some(&self.orders),
            _ => None,
        }
    }
}

/// ANY /{service}/{*rest} — forward a request to a backend service.
#[tracing::instrument(skip(state, headers, body))]
pub async fn forward(
    State(state): State<Arc<GatewayState>>,
    Path((service, rest)): Path<(String, String)>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let base = state
        .targets
        .resolve(&service)
        .ok_or_else(|| GatewayError::UnknownService(service.clone()))?;

    let mut url = format!("{base}/api/v1/{rest}");
    if let Some(query) = &query {
        url.push('?');
        url.push_str(query);
    }

    tracing::info!(%service, %url, "forwarding request");

    let mut request = state.client.request(method, &url);
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        request = request.header(header::CONTENT_TYPE, content_type);
    }

    let response = request
        .body(body)
        .send()
        .await
        .map_err(|err| GatewayError::Upstream {
            service: service.clone(),
            detail: err.to_string(),
        })?;

    let status = response.status();
    let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = response
        .bytes()
        .await
        .map_err(|err| GatewayError::Upstream {
            service: service.clone(),
            detail: err.to_string(),
        })?;

    let mut response_headers = HeaderMap::new();
    if let Some(content_type) = content_type {
        response_headers.insert(header::CONTENT_TYPE, content_type);
    }

    Ok((status, response_headers, bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> ServiceTargets {
        ServiceTargets::from_config(&Config::default())
    }

    #[test]
    fn test_resolve_known_services() {
        let targets = targets();
        assert_eq!(targets.resolve("users"), Some("http://127.0.0.1:5001"));
        assert_eq!(targets.resolve("catalog"), Some("http://127.0.0.1:5002"));
        assert_eq!(targets.resolve("orders"), Some("http://127.0.0.1:5003"));
    }

    #[test]
    fn test_resolve_unknown_service() {
        let targets = targets();
        assert_eq!(targets.resolve("billing"), None);
        assert_eq!(targets.resolve(""), None);
        assert_eq!(targets.resolve("Users"), None);
    }
}
