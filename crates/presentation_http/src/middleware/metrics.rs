//! Request metrics middleware
//!
//! Outermost stage of the protected pipeline: every completed request -
//! proxied, blocked, or synthetically answered by chaos - lands exactly one
//! request count and one latency sample in the collector. The tenant label
//! comes from the response extensions stamped by the tenant layer;
//! unauthenticated completions are labeled `unknown`.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Instant,
};

use application::GatewayMetrics;
use axum::{extract::Request, response::Response};
use tower::{Layer, Service};
use tracing::debug;

use crate::middleware::tenant::ResolvedTenant;

/// Layer that records request metrics
#[derive(Debug, Clone)]
pub struct MetricsLayer {
    metrics: Arc<GatewayMetrics>,
}

impl MetricsLayer {
    /// Create a layer recording into `metrics`
    pub fn new(metrics: Arc<GatewayMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsRecorder<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsRecorder {
            inner,
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Middleware service recording completions
#[derive(Debug, Clone)]
pub struct MetricsRecorder<S> {
    inner: S,
    metrics: Arc<GatewayMetrics>,
}

impl<S> Service<Request> for MetricsRecorder<S>
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

    #[allow(clippy::cast_possible_truncation)]
    fn call(&mut self, req: Request) -> Self::Future {
        let metrics = Arc::clone(&self.metrics);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let route = req.uri().path().to_string();
            let start = Instant::now();

            let response = inner.call(req).await?;

            let latency = start.elapsed();
            let tenant = response
                .extensions()
                .get::<ResolvedTenant>()
                .map_or("unknown", |t| t.0.id.as_str())
                .to_string();
            let status = response.status().as_u16();

            metrics.record_request(&route, &tenant, status);
            metrics.record_latency(&route, &tenant, latency);
            if status >= 400 {
                metrics.record_error(&route, &tenant);
            }

            debug!(
                path = %route,
                tenant = %tenant,
                status = status,
                duration_ms = latency.as_millis() as u64,
                "Request completed"
            );

            Ok(response)
        })
    }
}
