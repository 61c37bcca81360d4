//! Per-tenant rate limiting middleware
//!
//! Asks the rate-limit store whether the resolved tenant may proceed. A
//! block answers 429, emits a `BLOCK` decision event, and increments the
//! tenant's block counter in the metrics collector. A store failure fails
//! open: a broken budget backend must not take the gateway down.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use application::{GatewayMetrics, RateLimitStore};
use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use domain::DecisionKind;
use tower::{Layer, Service};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::middleware::tenant::ResolvedTenant;

/// Layer that applies per-tenant rate limiting
#[derive(Clone)]
pub struct RateLimitLayer {
    store: Arc<dyn RateLimitStore>,
    metrics: Arc<GatewayMetrics>,
    enabled: bool,
}

impl std::fmt::Debug for RateLimitLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitLayer")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl RateLimitLayer {
    /// Create a layer consuming budgets from `store`
    pub fn new(store: Arc<dyn RateLimitStore>, metrics: Arc<GatewayMetrics>, enabled: bool) -> Self {
        Self {
            store,
            metrics,
            enabled,
        }
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimiter<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimiter {
            inner,
            store: Arc::clone(&self.store),
            metrics: Arc::clone(&self.metrics),
            enabled: self.enabled,
        }
    }
}

/// Middleware service for rate limiting
#[derive(Clone)]
pub struct RateLimiter<S> {
    inner: S,
    store: Arc<dyn RateLimitStore>,
    metrics: Arc<GatewayMetrics>,
    enabled: bool,
}

impl<S: std::fmt::Debug> std::fmt::Debug for RateLimiter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("inner", &self.inner)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl<S> Service<Request> for RateLimiter<S>
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

    fn call(&mut self, req: Request) -> Self::Future {
        let store = Arc::clone(&self.store);
        let metrics = Arc::clone(&self.metrics);
        let enabled = self.enabled;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if !enabled {
                return inner.call(req).await;
            }

            let Some(ResolvedTenant(tenant)) = req.extensions().get::<ResolvedTenant>().cloned()
            else {
                // Tenant resolution runs before this layer; a missing tenant
                // means the pipeline is miswired
                return Ok(
                    ApiError::Unauthorized("Tenant not resolved".to_string()).into_response()
                );
            };

            let path = req.uri().path().to_string();

            match store.try_acquire(&tenant.id).await {
                Ok(decision) if decision.allowed => inner.call(req).await,
                Ok(_) => {
                    metrics.record_rate_limit(tenant.id.as_str());
                    info!(
                        decision = %DecisionKind::Block,
                        tenant = %tenant.id,
                        path = %path,
                        "Rate limit exceeded"
                    );
                    Ok(ApiError::RateLimited.into_response())
                },
                Err(e) => {
                    warn!(error = %e, tenant = %tenant.id, "Rate limit store failed, allowing request");
                    inner.call(req).await
                },
            }
        })
    }
}
