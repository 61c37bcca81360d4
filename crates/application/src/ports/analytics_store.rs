//! Analytics persistence port
//!
//! Per-tenant request counters keyed by endpoint. The production deployment
//! would back this with an external counter store with TTLs; the demo ships
//! an in-memory adapter. Either way the semantics are plain increments.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use domain::TenantId;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Aggregated counters for one (tenant, endpoint) pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointAnalytics {
    /// Total requests observed
    pub requests: u64,
    /// Requests answered with status >= 400
    pub errors: u64,
    /// Latency of the most recent request in milliseconds
    pub last_latency_ms: u64,
}

/// Store for per-tenant request analytics
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Increment the request counter for `(tenant, path)`
    async fn incr_request(&self, tenant: &TenantId, path: &str) -> Result<(), ApplicationError>;

    /// Record the latency of the most recent request for `(tenant, path)`
    async fn record_latency(
        &self,
        tenant: &TenantId,
        path: &str,
        latency: Duration,
    ) -> Result<(), ApplicationError>;

    /// Increment the error counter for `(tenant, path)`
    async fn incr_error(&self, tenant: &TenantId, path: &str) -> Result<(), ApplicationError>;

    /// Fetch all endpoint counters for a tenant, keyed by path
    async fn tenant_summary(
        &self,
        tenant: &TenantId,
    ) -> Result<BTreeMap<String, EndpointAnalytics>, ApplicationError>;
}
