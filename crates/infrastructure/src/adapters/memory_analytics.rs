//! In-memory analytics store

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use application::{AnalyticsStore, ApplicationError, EndpointAnalytics};
use async_trait::async_trait;
use domain::TenantId;
use parking_lot::RwLock;

/// Analytics counters held in process memory
#[derive(Debug, Default)]
pub struct MemoryAnalyticsStore {
    state: RwLock<HashMap<TenantId, BTreeMap<String, EndpointAnalytics>>>,
}

impl MemoryAnalyticsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalyticsStore for MemoryAnalyticsStore {
    async fn incr_request(&self, tenant: &TenantId, path: &str) -> Result<(), ApplicationError> {
        let mut state = self.state.write();
        let entry = state
            .entry(tenant.clone())
            .or_default()
            .entry(path.to_string())
            .or_default();
        entry.requests += 1;
        Ok(())
    }

    async fn record_latency(
        &self,
        tenant: &TenantId,
        path: &str,
        latency: Duration,
    ) -> Result<(), ApplicationError> {
        let mut state = self.state.write();
        let entry = state
            .entry(tenant.clone())
            .or_default()
            .entry(path.to_string())
            .or_default();
        #[allow(clippy::cast_possible_truncation)]
        {
            entry.last_latency_ms = latency.as_millis() as u64;
        }
        Ok(())
    }

    async fn incr_error(&self, tenant: &TenantId, path: &str) -> Result<(), ApplicationError> {
        let mut state = self.state.write();
        let entry = state
            .entry(tenant.clone())
            .or_default()
            .entry(path.to_string())
            .or_default();
        entry.errors += 1;
        Ok(())
    }

    async fn tenant_summary(
        &self,
        tenant: &TenantId,
    ) -> Result<BTreeMap<String, EndpointAnalytics>, ApplicationError> {
        Ok(self.state.read().get(tenant).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(id: &str) -> TenantId {
        TenantId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn counters_accumulate_per_endpoint() {
        let store = MemoryAnalyticsStore::new();
        let tenant = tenant("tenant-a");

        store.incr_request(&tenant, "/users").await.unwrap();
        store.incr_request(&tenant, "/users").await.unwrap();
        store.incr_request(&tenant, "/orders").await.unwrap();
        store.incr_error(&tenant, "/users").await.unwrap();
        store
            .record_latency(&tenant, "/users", Duration::from_millis(42))
            .await
            .unwrap();

        let summary = store.tenant_summary(&tenant).await.unwrap();
        assert_eq!(summary["/users"].requests, 2);
        assert_eq!(summary["/users"].errors, 1);
        assert_eq!(summary["/users"].last_latency_ms, 42);
        assert_eq!(summary["/orders"].requests, 1);
        assert_eq!(summary["/orders"].errors, 0);
    }

    #[tokio::test]
    async fn latency_keeps_most_recent_value() {
        let store = MemoryAnalyticsStore::new();
        let tenant = tenant("tenant-a");

        store
            .record_latency(&tenant, "/users", Duration::from_millis(10))
            .await
            .unwrap();
        store
            .record_latency(&tenant, "/users", Duration::from_millis(99))
            .await
            .unwrap();

        let summary = store.tenant_summary(&tenant).await.unwrap();
        assert_eq!(summary["/users"].last_latency_ms, 99);
    }

    #[tokio::test]
    async fn tenants_are_isolated() {
        let store = MemoryAnalyticsStore::new();
        store.incr_request(&tenant("tenant-a"), "/users").await.unwrap();

        let summary = store.tenant_summary(&tenant("tenant-b")).await.unwrap();
        assert!(summary.is_empty());
    }
}
