//! Faultline HTTP presentation layer
//!
//! This crate provides the gateway's HTTP surface: the protected proxy
//! pipeline, the chaos administration API, and the background recovery task.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use middleware::{
    API_KEY_HEADER, AnalyticsLayer, ChaosLayer, MetricsLayer, RateLimitLayer, RequestIdLayer,
    ResolvedTenant, TenantResolutionLayer, ValidatedJson, ValidationError,
};
pub use routes::create_router;
pub use state::AppState;
pub use tasks::spawn_chaos_recovery_task;
