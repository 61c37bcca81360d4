//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: in-memory
//! analytics and rate-limit stores, the reqwest-backed upstream client, and
//! configuration loading.

pub mod adapters;
pub mod config;

pub use adapters::{HttpUpstreamClient, MemoryAnalyticsStore, MemoryRateLimitStore};
pub use config::{
    AppConfig, BackendConfig, ChaosSchedulerConfig, RateLimitConfig, ServerConfig, TenantEntry,
};
