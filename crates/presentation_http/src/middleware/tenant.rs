//! Tenant resolution middleware
//!
//! Resolves `X-Api-Key` to a tenant through the static registry. A missing
//! or unknown key blocks the request with 401 before any other pipeline
//! stage runs. On success the tenant rides along in the request extensions
//! for the inner stages and is stamped into the response extensions so the
//! outer metrics layer can label completions by tenant.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use application::TenantRegistry;
use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use domain::{DecisionKind, Tenant};
use tower::{Layer, Service};
use tracing::info;

use crate::error::ApiError;

/// The header carrying the tenant API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// The tenant resolved for the current request
#[derive(Debug, Clone)]
pub struct ResolvedTenant(pub Tenant);

/// Layer that applies tenant resolution
#[derive(Debug, Clone)]
pub struct TenantResolutionLayer {
    registry: Arc<TenantRegistry>,
}

impl TenantResolutionLayer {
    /// Create a layer resolving keys against `registry`
    pub fn new(registry: Arc<TenantRegistry>) -> Self {
        Self { registry }
    }
}

impl<S> Layer<S> for TenantResolutionLayer {
    type Service = TenantResolution<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TenantResolution {
            inner,
            registry: Arc::clone(&self.registry),
        }
    }
}

/// Middleware service for tenant resolution
#[derive(Debug, Clone)]
pub struct TenantResolution<S> {
    inner: S,
    registry: Arc<TenantRegistry>,
}

impl<S> Service<Request> for TenantResolution<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let registry = Arc::clone(&self.registry);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let path = req.uri().path().to_string();
            let api_key = req
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            let Some(api_key) = api_key else {
                info!(decision = %DecisionKind::Block, path = %path, "Missing API key");
                return Ok(
                    ApiError::Unauthorized("Missing API key".to_string()).into_response()
                );
            };

            let Some(tenant) = registry.resolve(&api_key).cloned() else {
                info!(decision = %DecisionKind::Block, path = %path, "Invalid API key");
                return Ok(
                    ApiError::Unauthorized("Invalid API key".to_string()).into_response()
                );
            };

            info!(
                decision = %DecisionKind::Allow,
                tenant = %tenant.id,
                path = %path,
                "API key valid"
            );

            req.extensions_mut().insert(ResolvedTenant(tenant.clone()));

            let mut response = inner.call(req).await?;

            // Label the completed response for the outer metrics layer,
            // including short-circuits produced by inner stages
            response.extensions_mut().insert(ResolvedTenant(tenant));
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use domain::TenantId;
    use tower::ServiceExt;

    use super::*;

    async fn tenant_echo(req: Request) -> String {
        req.extensions()
            .get::<ResolvedTenant>()
            .map_or_else(|| "none".to_string(), |t| t.0.id.to_string())
    }

    fn registry() -> Arc<TenantRegistry> {
        Arc::new(TenantRegistry::new([(
            "sk_test_123".to_string(),
            Tenant::new(TenantId::parse("tenant-a").unwrap(), "Tenant A"),
        )]))
    }

    fn app() -> Router {
        Router::new()
            .route("/users", get(tenant_echo))
            .layer(TenantResolutionLayer::new(registry()))
    }

    #[tokio::test]
    async fn missing_api_key_is_unauthorized() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_api_key_is_unauthorized() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/users")
                    .header(API_KEY_HEADER, "sk_bogus")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_key_resolves_tenant_into_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/users")
                    .header(API_KEY_HEADER, "sk_test_123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"tenant-a");
    }

    #[tokio::test]
    async fn valid_key_labels_response_extensions() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/users")
                    .header(API_KEY_HEADER, "sk_test_123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let resolved = response.extensions().get::<ResolvedTenant>().unwrap();
        assert_eq!(resolved.0.id.as_str(), "tenant-a");
    }
}
