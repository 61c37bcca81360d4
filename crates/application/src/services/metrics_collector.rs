//! Gateway-wide request metrics
//!
//! Independent observability aggregate over all requests, chaosed or not:
//! per-route/per-tenant counters plus bounded latency sample buffers used
//! for nearest-rank percentile reporting. One reader-writer lock guards all
//! maps; writers hold it only for the increment or append, and `snapshot`
//! copies under the read lock then sorts outside it so the O(n log n) work
//! never blocks request completions.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Most recent latency samples retained per (route, tenant) key
const MAX_LATENCY_SAMPLES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RequestKey {
    route: String,
    tenant: String,
    status: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RouteTenantKey {
    route: String,
    tenant: String,
}

impl RouteTenantKey {
    fn new(route: &str, tenant: &str) -> Self {
        Self {
            route: route.to_string(),
            tenant: tenant.to_string(),
        }
    }

    fn joined(&self) -> String {
        format!("{}:{}", self.route, self.tenant)
    }
}

#[derive(Debug, Default)]
struct MetricsState {
    request_count: HashMap<RequestKey, u64>,
    error_count: HashMap<RouteTenantKey, u64>,
    dropped_count: HashMap<RouteTenantKey, u64>,
    rate_limit_count: HashMap<String, u64>,
    latencies: HashMap<RouteTenantKey, VecDeque<Duration>>,
}

/// Latency percentiles for one (route, tenant) key, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyPercentiles {
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Point-in-time copy of all gateway metrics
///
/// Keys are joined as `route:tenant` (plus `:status` for request counts) to
/// stay greppable in dashboards and test assertions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub requests_total: BTreeMap<String, u64>,
    pub errors_total: BTreeMap<String, u64>,
    pub requests_dropped: BTreeMap<String, u64>,
    pub rate_limit_blocks: BTreeMap<String, u64>,
    pub latency_percentiles: BTreeMap<String, LatencyPercentiles>,
}

/// Process-wide metrics collector
#[derive(Debug, Default)]
pub struct GatewayMetrics {
    state: RwLock<MetricsState>,
}

impl GatewayMetrics {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a completed request for `(route, tenant, status)`
    pub fn record_request(&self, route: &str, tenant: &str, status: u16) {
        let key = RequestKey {
            route: route.to_string(),
            tenant: tenant.to_string(),
            status,
        };
        *self.state.write().request_count.entry(key).or_default() += 1;
    }

    /// Append a latency sample for `(route, tenant)`, evicting the oldest
    /// sample once the buffer holds `MAX_LATENCY_SAMPLES`
    pub fn record_latency(&self, route: &str, tenant: &str, latency: Duration) {
        let mut state = self.state.write();
        let samples = state
            .latencies
            .entry(RouteTenantKey::new(route, tenant))
            .or_default();
        samples.push_back(latency);
        if samples.len() > MAX_LATENCY_SAMPLES {
            samples.pop_front();
        }
    }

    /// Count an error response (status >= 400) for `(route, tenant)`
    pub fn record_error(&self, route: &str, tenant: &str) {
        let key = RouteTenantKey::new(route, tenant);
        *self.state.write().error_count.entry(key).or_default() += 1;
    }

    /// Count a chaos-dropped request for `(route, tenant)`
    pub fn record_dropped(&self, route: &str, tenant: &str) {
        let key = RouteTenantKey::new(route, tenant);
        *self.state.write().dropped_count.entry(key).or_default() += 1;
    }

    /// Count a rate-limit block for `tenant`
    pub fn record_rate_limit(&self, tenant: &str) {
        *self
            .state
            .write()
            .rate_limit_count
            .entry(tenant.to_string())
            .or_default() += 1;
    }

    /// Compute a full snapshot, including p50/p95/p99 per latency key
    ///
    /// Recomputed from scratch on every call; buffers are capped at
    /// `MAX_LATENCY_SAMPLES` so the sort stays cheap.
    pub fn snapshot(&self) -> MetricsSnapshot {
        // Copy everything out, then release the lock before sorting
        let (requests, errors, dropped, rate_limited, latencies) = {
            let state = self.state.read();
            let requests: BTreeMap<String, u64> = state
                .request_count
                .iter()
                .map(|(k, v)| (format!("{}:{}:{}", k.route, k.tenant, k.status), *v))
                .collect();
            let errors: BTreeMap<String, u64> = state
                .error_count
                .iter()
                .map(|(k, v)| (k.joined(), *v))
                .collect();
            let dropped: BTreeMap<String, u64> = state
                .dropped_count
                .iter()
                .map(|(k, v)| (k.joined(), *v))
                .collect();
            let rate_limited: BTreeMap<String, u64> = state
                .rate_limit_count
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect();
            let latencies: Vec<(String, Vec<Duration>)> = state
                .latencies
                .iter()
                .filter(|(_, samples)| !samples.is_empty())
                .map(|(k, samples)| (k.joined(), samples.iter().copied().collect()))
                .collect();
            (requests, errors, dropped, rate_limited, latencies)
        };

        let latency_percentiles = latencies
            .into_iter()
            .map(|(key, mut samples)| {
                samples.sort_unstable();
                let percentiles = LatencyPercentiles {
                    p50: to_millis(nearest_rank(&samples, 50)),
                    p95: to_millis(nearest_rank(&samples, 95)),
                    p99: to_millis(nearest_rank(&samples, 99)),
                };
                (key, percentiles)
            })
            .collect();

        MetricsSnapshot {
            requests_total: requests,
            errors_total: errors,
            requests_dropped: dropped,
            rate_limit_blocks: rate_limited,
            latency_percentiles,
        }
    }
}

/// Nearest-rank percentile: the element at 1-based rank `n * pct / 100`,
/// with rank 0 clamped to the smallest sample. No interpolation.
fn nearest_rank(sorted: &[Duration], pct: usize) -> Duration {
    let rank = sorted.len() * pct / 100;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

fn to_millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
