//! Per-tenant request analytics
//!
//! Thin orchestration over the `AnalyticsStore` port: one completed request
//! becomes a request increment, a latency write, and an error increment when
//! the status is 4xx/5xx.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use domain::TenantId;

use crate::error::ApplicationError;
use crate::ports::{AnalyticsStore, EndpointAnalytics};

/// Records and serves per-tenant endpoint analytics
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn AnalyticsStore>,
}

impl std::fmt::Debug for AnalyticsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsService").finish_non_exhaustive()
    }
}

impl AnalyticsService {
    /// Create a service over the given store
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self { store }
    }

    /// Record one completed request
    pub async fn record_request(
        &self,
        tenant: &TenantId,
        path: &str,
        latency: Duration,
        status: u16,
    ) -> Result<(), ApplicationError> {
        self.store.incr_request(tenant, path).await?;
        self.store.record_latency(tenant, path, latency).await?;
        if status >= 400 {
            self.store.incr_error(tenant, path).await?;
        }
        Ok(())
    }

    /// Fetch the per-endpoint summary for a tenant
    pub async fn tenant_summary(
        &self,
        tenant: &TenantId,
    ) -> Result<BTreeMap<String, EndpointAnalytics>, ApplicationError> {
        self.store.tenant_summary(tenant).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::ports::MockAnalyticsStore;

    fn tenant() -> TenantId {
        TenantId::parse("tenant-a").unwrap()
    }

    #[tokio::test]
    async fn success_status_skips_error_counter() {
        let mut store = MockAnalyticsStore::new();
        store
            .expect_incr_request()
            .with(eq(tenant()), eq("/users"))
            .once()
            .returning(|_, _| Ok(()));
        store
            .expect_record_latency()
            .once()
            .returning(|_, _, _| Ok(()));
        store.expect_incr_error().never();

        let service = AnalyticsService::new(Arc::new(store));
        service
            .record_request(&tenant(), "/users", Duration::from_millis(12), 200)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn error_status_increments_error_counter() {
        let mut store = MockAnalyticsStore::new();
        store.expect_incr_request().once().returning(|_, _| Ok(()));
        store
            .expect_record_latency()
            .once()
            .returning(|_, _, _| Ok(()));
        store
            .expect_incr_error()
            .with(eq(tenant()), eq("/users"))
            .once()
            .returning(|_, _| Ok(()));

        let service = AnalyticsService::new(Arc::new(store));
        service
            .record_request(&tenant(), "/users", Duration::from_millis(12), 503)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rate_limited_status_counts_as_error() {
        let mut store = MockAnalyticsStore::new();
        store.expect_incr_request().once().returning(|_, _| Ok(()));
        store
            .expect_record_latency()
            .once()
            .returning(|_, _, _| Ok(()));
        store.expect_incr_error().once().returning(|_, _| Ok(()));

        let service = AnalyticsService::new(Arc::new(store));
        service
            .record_request(&tenant(), "/users", Duration::from_millis(1), 429)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn tenant_summary_passes_through() {
        let mut store = MockAnalyticsStore::new();
        store
            .expect_tenant_summary()
            .with(eq(tenant()))
            .once()
            .returning(|_| {
                let mut summary = BTreeMap::new();
                summary.insert(
                    "/users".to_string(),
                    EndpointAnalytics {
                        requests: 3,
                        errors: 1,
                        last_latency_ms: 15,
                    },
                );
                Ok(summary)
            });

        let service = AnalyticsService::new(Arc::new(store));
        let summary = service.tenant_summary(&tenant()).await.unwrap();
        assert_eq!(summary["/users"].requests, 3);
        assert_eq!(summary["/users"].errors, 1);
    }
}
