//! Analytics recording middleware
//!
//! Sits between tenant resolution and rate limiting so that rate-limited
//! requests (429) are still captured in the tenant's counters. Recording is
//! best-effort: an analytics failure is logged, never surfaced to the
//! client.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use application::AnalyticsService;
use axum::{extract::Request, response::Response};
use tower::{Layer, Service};
use tracing::warn;

use crate::middleware::tenant::ResolvedTenant;

/// Layer that applies analytics recording
#[derive(Debug, Clone)]
pub struct AnalyticsLayer {
    analytics: AnalyticsService,
}

impl AnalyticsLayer {
    /// Create a layer recording into `analytics`
    pub fn new(analytics: AnalyticsService) -> Self {
        Self { analytics }
    }
}

impl<S> Layer<S> for AnalyticsLayer {
    type Service = AnalyticsRecorder<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AnalyticsRecorder {
            inner,
            analytics: self.analytics.clone(),
        }
    }
}

/// Middleware service recording per-tenant analytics
#[derive(Debug, Clone)]
pub struct AnalyticsRecorder<S> {
    inner: S,
    analytics: AnalyticsService,
}

impl<S> Service<Request> for AnalyticsRecorder<S>
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
        let analytics = self.analytics.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let tenant = req.extensions().get::<ResolvedTenant>().cloned();
            let path = req.uri().path().to_string();
            let start = Instant::now();

            let response = inner.call(req).await?;

            if let Some(ResolvedTenant(tenant)) = tenant {
                let status = response.status().as_u16();
                if let Err(e) = analytics
                    .record_request(&tenant.id, &path, start.elapsed(), status)
                    .await
                {
                    warn!(error = %e, tenant = %tenant.id, "Failed to record analytics");
                }
            }

            Ok(response)
        })
    }
}
