//! Port adapters

mod http_upstream;
mod memory_analytics;
mod memory_rate_limit;

pub use http_upstream::HttpUpstreamClient;
pub use memory_analytics::MemoryAnalyticsStore;
pub use memory_rate_limit::MemoryRateLimitStore;
