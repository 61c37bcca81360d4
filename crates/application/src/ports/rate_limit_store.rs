//! Rate-limit persistence port
//!
//! The gateway only asks one question per request: may this tenant proceed?
//! Window bookkeeping (counters with expiry) is the adapter's concern.

use async_trait::async_trait;
use domain::TenantId;

use crate::error::ApplicationError;

/// Outcome of a rate-limit acquisition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Tokens remaining in the current window after this attempt
    pub remaining: u32,
}

/// Store tracking per-tenant request budgets
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Try to consume one unit of the tenant's budget
    async fn try_acquire(&self, tenant: &TenantId) -> Result<RateLimitDecision, ApplicationError>;
}
