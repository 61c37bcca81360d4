//! Application state shared across handlers and middleware
//!
//! All gateway services are constructed once at the composition root and
//! shared by handle; there is no package-level mutable state anywhere, so
//! tests assemble isolated `AppState` instances per case.

use std::sync::Arc;

use application::{
    AnalyticsService, ChaosController, FaultRandom, GatewayMetrics, RateLimitStore,
    TenantRegistry, UpstreamClient, UpstreamRouter,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Owner of the chaos configuration and stats
    pub chaos: Arc<ChaosController>,
    /// Gateway-wide request metrics
    pub metrics: Arc<GatewayMetrics>,
    /// Per-tenant analytics recording and queries
    pub analytics: AnalyticsService,
    /// API-key-to-tenant resolution
    pub tenant_registry: Arc<TenantRegistry>,
    /// Per-tenant rate-limit budgets
    pub rate_limit: Arc<dyn RateLimitStore>,
    /// Whether the rate-limit stage is active
    pub rate_limit_enabled: bool,
    /// Randomness source for injection decisions
    pub fault_random: Arc<dyn FaultRandom>,
    /// Route-prefix-to-backend table
    pub upstream_router: Arc<UpstreamRouter>,
    /// Client used to forward matched requests
    pub upstream: Arc<dyn UpstreamClient>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("chaos", &self.chaos)
            .field("rate_limit_enabled", &self.rate_limit_enabled)
            .field("upstream_router", &self.upstream_router)
            .finish_non_exhaustive()
    }
}
