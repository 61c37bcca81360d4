//! Reqwest-backed upstream client
//!
//! The standard HTTP proxy primitive behind the `UpstreamClient` port:
//! rebuilds the request against the backend base URL, preserving method,
//! path, query, body, and content type, and carries the backend's answer
//! back verbatim.

use std::time::Duration;

use application::{ApplicationError, ProxiedRequest, ProxiedResponse, UpstreamClient};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

/// Default end-to-end timeout for upstream calls
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client forwarding proxied requests to backends
#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    client: reqwest::Client,
}

impl HttpUpstreamClient {
    /// Create a client with the default upstream timeout
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_timeout(UPSTREAM_TIMEOUT)
    }

    /// Create a client with a custom upstream timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, ApplicationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn forward(
        &self,
        base_url: &str,
        request: ProxiedRequest,
    ) -> Result<ProxiedResponse, ApplicationError> {
        let url = format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            request.path_and_query
        );
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| ApplicationError::Upstream(format!("invalid method: {e}")))?;

        let mut builder = self.client.request(method, &url);
        if let Some(content_type) = &request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApplicationError::Upstream(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| ApplicationError::Upstream(e.to_string()))?;

        Ok(ProxiedResponse {
            status,
            body,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use wiremock::matchers::{body_string, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn get_request(path_and_query: &str) -> ProxiedRequest {
        ProxiedRequest {
            method: "GET".to_string(),
            path_and_query: path_and_query.to_string(),
            body: Bytes::new(),
            content_type: None,
        }
    }

    #[tokio::test]
    async fn forwards_get_with_path_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/42"))
            .and(query_param("expand", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("{\"id\":42}", "application/json"),
            )
            .mount(&server)
            .await;

        let client = HttpUpstreamClient::new().unwrap();
        let response = client
            .forward(&server.uri(), get_request("/users/42?expand=1"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Bytes::from_static(b"{\"id\":42}"));
        assert_eq!(response.content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn forwards_post_body_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orders"))
            .and(body_string("{\"sku\":\"x\"}"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = HttpUpstreamClient::new().unwrap();
        let response = client
            .forward(
                &server.uri(),
                ProxiedRequest {
                    method: "POST".to_string(),
                    path_and_query: "/orders".to_string(),
                    body: Bytes::from_static(b"{\"sku\":\"x\"}"),
                    content_type: Some("application/json".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn backend_error_statuses_pass_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = HttpUpstreamClient::new().unwrap();
        let response = client
            .forward(&server.uri(), get_request("/users"))
            .await
            .unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(response.body, Bytes::from_static(b"boom"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_upstream_error() {
        let client = HttpUpstreamClient::with_timeout(Duration::from_millis(500)).unwrap();
        // RFC 5737 TEST-NET address, nothing listens there
        let result = client
            .forward("http://192.0.2.1:9", get_request("/users"))
            .await;

        assert!(matches!(result, Err(ApplicationError::Upstream(_))));
    }

    #[tokio::test]
    async fn trailing_slash_on_base_url_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = HttpUpstreamClient::new().unwrap();
        let base = format!("{}/", server.uri());
        let response = client.forward(&base, get_request("/users")).await.unwrap();

        assert_eq!(response.status, 200);
    }
}
