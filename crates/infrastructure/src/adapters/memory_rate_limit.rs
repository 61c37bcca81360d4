//! In-memory fixed-window rate limiter
//!
//! Counter-per-tenant with a rolling window start, the in-process equivalent
//! of a counter-with-TTL in an external store. The window resets lazily on
//! the first acquisition after expiry; the lock is held only for the
//! counter update.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use application::{ApplicationError, RateLimitDecision, RateLimitStore};
use async_trait::async_trait;
use domain::TenantId;
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy)]
struct WindowState {
    count: u32,
    started_at: Instant,
}

/// Fixed-window counter store keyed by tenant
#[derive(Debug)]
pub struct MemoryRateLimitStore {
    limit: u32,
    window: Duration,
    windows: Mutex<HashMap<TenantId, WindowState>>,
}

impl MemoryRateLimitStore {
    /// Create a store allowing `limit` requests per tenant per `window`
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn try_acquire(&self, tenant: &TenantId) -> Result<RateLimitDecision, ApplicationError> {
        let mut windows = self.windows.lock();
        let now = Instant::now();
        let state = windows.entry(tenant.clone()).or_insert(WindowState {
            count: 0,
            started_at: now,
        });

        if now.duration_since(state.started_at) >= self.window {
            state.count = 0;
            state.started_at = now;
        }

        if state.count >= self.limit {
            return Ok(RateLimitDecision {
                allowed: false,
                remaining: 0,
            });
        }

        state.count += 1;
        Ok(RateLimitDecision {
            allowed: true,
            remaining: self.limit - state.count,
        })
    }
}
