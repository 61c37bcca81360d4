//! Upstream dispatch port
//!
//! The proxy handler hands a matched request to this port once the
//! middleware pipeline has allowed it through. The adapter owns the HTTP
//! client mechanics; the core only sees a simplified request/response pair.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ApplicationError;

/// A request ready to be forwarded to a backend
#[derive(Debug, Clone)]
pub struct ProxiedRequest {
    /// HTTP method name (`GET`, `POST`, ...)
    pub method: String,
    /// Origin-form path and query (`/users/42?expand=1`)
    pub path_and_query: String,
    /// Request body bytes (empty for bodiless methods)
    pub body: Bytes,
    /// Content type of the body, if any
    pub content_type: Option<String>,
}

/// A backend response carried back to the client
#[derive(Debug, Clone)]
pub struct ProxiedResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes
    pub body: Bytes,
    /// Content type of the body, if any
    pub content_type: Option<String>,
}

/// Client able to forward requests to a backend base URL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Forward `request` to the backend rooted at `base_url`
    async fn forward(
        &self,
        base_url: &str,
        request: ProxiedRequest,
    ) -> Result<ProxiedResponse, ApplicationError>;
}
