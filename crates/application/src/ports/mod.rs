//! Port definitions implemented by the infrastructure layer

mod analytics_store;
mod rate_limit_store;
mod upstream_client;

pub use analytics_store::{AnalyticsStore, EndpointAnalytics};
pub use rate_limit_store::{RateLimitDecision, RateLimitStore};
pub use upstream_client::{ProxiedRequest, ProxiedResponse, UpstreamClient};

#[cfg(test)]
pub use analytics_store::MockAnalyticsStore;
#[cfg(test)]
pub use rate_limit_store::MockRateLimitStore;
#[cfg(test)]
pub use upstream_client::MockUpstreamClient;
