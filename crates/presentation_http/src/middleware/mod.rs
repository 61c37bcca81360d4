//! HTTP middleware components
//!
//! The protected pipeline wraps the proxied backend routes in this order,
//! outermost first: request ID, metrics, tenant resolution, analytics, rate
//! limiting, chaos injection. Admin and health routes only get the request
//! ID layer.

pub mod analytics;
pub mod chaos;
pub mod metrics;
pub mod rate_limit;
pub mod request_id;
pub mod tenant;
pub mod validation;

pub use analytics::AnalyticsLayer;
pub use chaos::ChaosLayer;
pub use metrics::MetricsLayer;
pub use rate_limit::RateLimitLayer;
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use tenant::{API_KEY_HEADER, ResolvedTenant, TenantResolutionLayer};
pub use validation::{ValidatedJson, ValidationError};
