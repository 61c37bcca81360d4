//! Chaos controller - sole owner of the injection policy and its stats
//!
//! All reads and writes to `ChaosConfig`/`ChaosStats` are serialized through
//! this service. One reader-writer lock guards both structures: snapshot
//! reads may proceed concurrently with each other, never with a write, and
//! no operation blocks on I/O. The controller is constructed explicitly at
//! the composition root and shared as `Arc<ChaosController>`; tests build
//! isolated instances per case.

use chrono::{DateTime, Utc};
use domain::{ChaosConfig, ChaosStats};
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct ControllerState {
    config: ChaosConfig,
    stats: ChaosStats,
}

/// Owner of the active chaos configuration and cumulative stats
#[derive(Debug, Default)]
pub struct ChaosController {
    state: RwLock<ControllerState>,
}

impl ChaosController {
    /// Create a controller with injection disabled and zeroed stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the entire configuration
    ///
    /// Stamps `last_injection_time` when the new configuration is enabled.
    /// The controller performs no validation; percentage ranges are checked
    /// at the administrative boundary.
    pub fn set_config(&self, config: ChaosConfig) {
        let mut state = self.state.write();
        if config.enabled {
            state.stats.last_injection_time = Some(Utc::now());
        }
        state.config = config;
    }

    /// Consistent snapshot of the current configuration
    pub fn config(&self) -> ChaosConfig {
        self.state.read().config.clone()
    }

    /// Reset the configuration to its disabled zero value and stamp
    /// `last_recovery_time`
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.config = ChaosConfig::default();
        state.stats.last_recovery_time = Some(Utc::now());
    }

    /// Consistent snapshot of the cumulative stats
    pub fn stats(&self) -> ChaosStats {
        self.state.read().stats.clone()
    }

    /// Count a request observed by the chaos middleware
    pub fn record_request(&self) {
        self.state.write().stats.total_requests += 1;
    }

    /// Count a synthetically dropped request
    pub fn record_drop(&self) {
        self.state.write().stats.dropped_requests += 1;
    }

    /// Count a synthetically failed request
    pub fn record_fail(&self) {
        self.state.write().stats.failed_requests += 1;
    }

    /// Count a delayed request
    pub fn record_delay(&self) {
        self.state.write().stats.delayed_requests += 1;
    }

    /// Clear the configuration if it has expired as of `now`
    ///
    /// The expiry check and the reset happen under one write-lock
    /// acquisition, so a configuration freshly re-armed by a concurrent
    /// `set_config` is never clobbered by a stale scheduler tick. Returns
    /// whether a recovery occurred.
    pub fn try_auto_recover(&self, now: DateTime<Utc>) -> bool {
        let mut state = self.state.write();
        if state.config.enabled && state.config.is_expired(now) {
            state.config = ChaosConfig::default();
            state.stats.last_recovery_time = Some(now);
            true
        } else {
            false
        }
    }
}
