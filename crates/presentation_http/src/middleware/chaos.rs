//! Chaos fault-injection middleware
//!
//! The per-request decision pipeline over the controller's configuration
//! snapshot. Stage order is fixed: delay, then error, then drop. The stages
//! stack - a request can be delayed and then still fail - and each
//! percentage check is a fresh independent draw, with the error check
//! short-circuiting before the drop check ever runs. Do not reorder or
//! merge the draws: the error-over-drop priority is observable behavior.
//!
//! The injected sleep suspends only the request undergoing it; no lock is
//! held across it. Nothing in this pipeline can itself fail - the 503/504
//! answers it produces are designed synthetic outcomes.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use application::{ChaosController, FaultRandom, GatewayMetrics};
use axum::{
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{ChaosType, DecisionKind};
use tower::{Layer, Service};
use tracing::info;

use crate::error::ApiError;
use crate::middleware::tenant::ResolvedTenant;

/// Layer that applies chaos fault injection
#[derive(Clone)]
pub struct ChaosLayer {
    controller: Arc<ChaosController>,
    random: Arc<dyn FaultRandom>,
    metrics: Arc<GatewayMetrics>,
}

impl std::fmt::Debug for ChaosLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChaosLayer")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl ChaosLayer {
    /// Create a layer reading policy from `controller` and drawing from
    /// `random`
    pub fn new(
        controller: Arc<ChaosController>,
        random: Arc<dyn FaultRandom>,
        metrics: Arc<GatewayMetrics>,
    ) -> Self {
        Self {
            controller,
            random,
            metrics,
        }
    }
}

impl<S> Layer<S> for ChaosLayer {
    type Service = ChaosInjector<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ChaosInjector {
            inner,
            controller: Arc::clone(&self.controller),
            random: Arc::clone(&self.random),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Middleware service applying the injection pipeline per request
#[derive(Clone)]
pub struct ChaosInjector<S> {
    inner: S,
    controller: Arc<ChaosController>,
    random: Arc<dyn FaultRandom>,
    metrics: Arc<GatewayMetrics>,
}

impl<S: std::fmt::Debug> std::fmt::Debug for ChaosInjector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChaosInjector")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<S> Service<Request> for ChaosInjector<S>
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
        let controller = Arc::clone(&self.controller);
        let random = Arc::clone(&self.random);
        let metrics = Arc::clone(&self.metrics);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let config = controller.config();
            controller.record_request();

            if !config.enabled {
                return inner.call(req).await;
            }

            let path = req.uri().path().to_string();
            if !config.matches_route(&path) {
                return inner.call(req).await;
            }

            // Inject delay
            if config.delay > Duration::ZERO {
                controller.record_delay();
                info!(
                    decision = %DecisionKind::Chaos,
                    chaos_type = %ChaosType::SlowMode,
                    delay_ms = config.delay.as_millis() as u64,
                    path = %path,
                    "Injected latency"
                );
                tokio::time::sleep(config.delay).await;
            }

            // Inject errors
            if config.error_rate > 0 && random.percent() < config.error_rate {
                controller.record_fail();
                info!(
                    decision = %DecisionKind::Chaos,
                    chaos_type = %ChaosType::FailBackend,
                    error_code = StatusCode::SERVICE_UNAVAILABLE.as_u16(),
                    path = %path,
                    "Injected backend failure"
                );
                return Ok(ApiError::ServiceUnavailable(
                    "Service unavailable (chaos injection)".to_string(),
                )
                .into_response());
            }

            // Drop requests
            if config.drop_rate > 0 && random.percent() < config.drop_rate {
                controller.record_drop();
                let tenant = req
                    .extensions()
                    .get::<ResolvedTenant>()
                    .map_or("unknown", |t| t.0.id.as_str())
                    .to_string();
                metrics.record_dropped(&path, &tenant);
                info!(
                    decision = %DecisionKind::Chaos,
                    chaos_type = %ChaosType::DropPercent,
                    path = %path,
                    "Dropped request"
                );
                return Ok(ApiError::GatewayTimeout(
                    "Request dropped (chaos injection)".to_string(),
                )
                .into_response());
            }

            inner.call(req).await
        })
    }
}
