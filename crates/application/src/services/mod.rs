//! Application services

mod analytics_service;
mod chaos_controller;
mod metrics_collector;
mod tenant_registry;
mod upstream_router;

pub use analytics_service::AnalyticsService;
pub use chaos_controller::ChaosController;
pub use metrics_collector::{GatewayMetrics, LatencyPercentiles, MetricsSnapshot};
pub use tenant_registry::TenantRegistry;
pub use upstream_router::{BackendRoute, UpstreamRouter};
