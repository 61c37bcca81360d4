//! Route definitions
//!
//! Two route families share one router: the administrative/observability
//! surface, reachable without tenant credentials, and the proxied backend
//! routes wrapped in the protected pipeline. Only the request-ID layer
//! spans both.

use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get, post},
};
use tower::ServiceBuilder;

use crate::middleware::{
    AnalyticsLayer, ChaosLayer, MetricsLayer, RateLimitLayer, RequestIdLayer,
    TenantResolutionLayer,
};
use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        // Health and observability
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::get_metrics))
        // Chaos administration
        .route("/admin/chaos", post(handlers::chaos_admin::apply_chaos))
        .route(
            "/admin/chaos/recover",
            post(handlers::chaos_admin::recover_chaos),
        )
        .route(
            "/admin/chaos/status",
            get(handlers::chaos_admin::chaos_status),
        )
        // Analytics
        .route(
            "/admin/analytics",
            get(handlers::analytics::tenant_analytics),
        );

    // One pair of routes per configured backend prefix
    let mut proxied = Router::new();
    for route in state.upstream_router.routes() {
        let prefix = route.prefix.trim_end_matches('/');
        if prefix.is_empty() {
            continue;
        }
        proxied = proxied
            .route(prefix, any(handlers::proxy::forward))
            .route(&format!("{prefix}/{{*rest}}"), any(handlers::proxy::forward));
    }

    // Request flow, outermost first: metrics -> tenant -> analytics ->
    // rate limit -> chaos -> proxy
    let proxied = proxied.layer(
        ServiceBuilder::new()
            .layer(MetricsLayer::new(Arc::clone(&state.metrics)))
            .layer(TenantResolutionLayer::new(Arc::clone(
                &state.tenant_registry,
            )))
            .layer(AnalyticsLayer::new(state.analytics.clone()))
            .layer(RateLimitLayer::new(
                Arc::clone(&state.rate_limit),
                Arc::clone(&state.metrics),
                state.rate_limit_enabled,
            ))
            .layer(ChaosLayer::new(
                Arc::clone(&state.chaos),
                Arc::clone(&state.fault_random),
                Arc::clone(&state.metrics),
            )),
    );

    admin
        .merge(proxied)
        .layer(RequestIdLayer::new())
        .with_state(state)
}
