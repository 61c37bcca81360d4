//! Chaos fault-injection data model
//!
//! `ChaosConfig` is the active injection policy and `ChaosStats` the
//! cumulative outcome counters. Both are owned exclusively by the chaos
//! controller in the application layer; nothing else mutates them.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The active fault-injection policy
///
/// The zero value (`ChaosConfig::default()`) means injection is disabled.
/// The configuration is replaced wholesale on every administrative set and
/// reset to the zero value on recovery or expiry; there are no partial field
/// updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaosConfig {
    /// Whether any injection is active
    pub enabled: bool,

    /// If set, injection applies only to requests whose path equals this
    /// value; `None` means all routes
    pub route: Option<String>,

    /// Fixed latency added to every matching request (zero = none)
    #[serde(rename = "delay_ms", with = "duration_millis")]
    pub delay: Duration,

    /// Percent chance (0-100) a matching request is answered with a
    /// synthetic failure
    pub error_rate: u8,

    /// Percent chance (0-100) a matching request is answered with a
    /// synthetic drop, evaluated only if the error check did not trigger
    pub drop_rate: u8,

    /// If set, the configuration is stale once current time passes it and
    /// the recovery scheduler clears it; `None` means manual recovery only
    pub expires_at: Option<DateTime<Utc>>,
}

impl ChaosConfig {
    /// Whether this configuration applies to a request for `path`
    ///
    /// An absent or empty route filter matches every path; otherwise the
    /// filter must equal the path exactly.
    pub fn matches_route(&self, path: &str) -> bool {
        match self.route.as_deref() {
            None | Some("") => true,
            Some(filter) => filter == path,
        }
    }

    /// Whether this configuration has expired as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }
}

/// Cumulative fault-injection counters
///
/// Counters increase monotonically until process restart; they are never
/// reset by recovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaosStats {
    /// Requests observed by the chaos middleware (injection active or not)
    pub total_requests: u64,
    /// Requests answered with a synthetic drop
    pub dropped_requests: u64,
    /// Requests answered with a synthetic failure
    pub failed_requests: u64,
    /// Requests that had latency injected
    pub delayed_requests: u64,
    /// When an injection configuration was last armed
    pub last_injection_time: Option<DateTime<Utc>>,
    /// When the configuration was last cleared (manually or by expiry)
    pub last_recovery_time: Option<DateTime<Utc>>,
}

/// Serialize a `Duration` as integer milliseconds
mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
