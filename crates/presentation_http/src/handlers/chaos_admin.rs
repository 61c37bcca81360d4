//! Chaos administration handlers
//!
//! The administrative surface over the chaos controller: arm a
//! configuration, recover manually, and inspect current state. Percentages
//! are range-checked here at the boundary; the controller accepts whatever
//! it is handed. Set and recover cannot fail once their payload parses -
//! callers always get an acknowledgement.

use std::time::Duration;

use axum::{Json, extract::State};
use chrono::{TimeDelta, Utc};
use domain::{ChaosConfig, ChaosStats, ChaosType, DecisionKind};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::middleware::ValidatedJson;
use crate::state::AppState;

/// Request to arm a chaos configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ChaosRequest {
    /// Force every matching request to fail (maps to error rate 100)
    #[serde(default)]
    pub fail_backend: bool,

    /// Fixed latency to inject, in milliseconds
    #[serde(default)]
    pub slow_ms: u64,

    /// Percent of matching requests to drop
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub drop_percent: u8,

    /// Auto-recovery window in seconds; 0 means manual recovery only
    #[serde(default)]
    pub duration_sec: u32,

    /// Route filter; empty or absent applies to all routes
    #[serde(default)]
    pub route: Option<String>,
}

impl ChaosRequest {
    /// Build the controller configuration this request describes
    fn to_config(&self) -> ChaosConfig {
        let mut config = ChaosConfig {
            enabled: true,
            ..Default::default()
        };
        if self.fail_backend {
            config.error_rate = 100;
        }
        if self.slow_ms > 0 {
            config.delay = Duration::from_millis(self.slow_ms);
        }
        if self.drop_percent > 0 {
            config.drop_rate = self.drop_percent;
        }
        config.route = self.route.clone().filter(|r| !r.is_empty());
        if self.duration_sec > 0 {
            config.expires_at = Some(Utc::now() + TimeDelta::seconds(i64::from(self.duration_sec)));
        }
        config
    }
}

/// Acknowledgement body for set/recover calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub message: String,
}

/// Current chaos state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaosStatusResponse {
    pub enabled: bool,
    pub config: ChaosConfig,
    pub stats: ChaosStats,
    pub is_recovered: bool,
}

/// Apply a chaos configuration (`POST /admin/chaos`)
pub async fn apply_chaos(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChaosRequest>,
) -> Json<AckResponse> {
    state.chaos.set_config(request.to_config());

    info!(
        decision = %DecisionKind::Chaos,
        fail_backend = request.fail_backend,
        slow_ms = request.slow_ms,
        drop_percent = request.drop_percent,
        duration_sec = request.duration_sec,
        route = request.route.as_deref().unwrap_or(""),
        "Chaos configuration applied"
    );

    Json(AckResponse {
        message: "Chaos enabled".to_string(),
    })
}

/// Disable all chaos (`POST /admin/chaos/recover`)
pub async fn recover_chaos(State(state): State<AppState>) -> Json<AckResponse> {
    state.chaos.clear();

    info!(
        decision = %DecisionKind::Chaos,
        chaos_type = %ChaosType::Recovery,
        "Chaos recovery initiated"
    );

    Json(AckResponse {
        message: "Chaos disabled - system recovered".to_string(),
    })
}

/// Inspect the current configuration and stats (`GET /admin/chaos/status`)
pub async fn chaos_status(State(state): State<AppState>) -> Json<ChaosStatusResponse> {
    let config = state.chaos.config();
    let stats = state.chaos.stats();

    Json(ChaosStatusResponse {
        enabled: config.enabled,
        is_recovered: !config.enabled && stats.last_recovery_time.is_some(),
        config,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_backend_forces_error_rate() {
        let request = ChaosRequest {
            fail_backend: true,
            ..Default::default()
        };
        let config = request.to_config();
        assert!(config.enabled);
        assert_eq!(config.error_rate, 100);
        assert_eq!(config.drop_rate, 0);
        assert_eq!(config.delay, Duration::ZERO);
        assert!(config.expires_at.is_none());
    }

    #[test]
    fn slow_ms_maps_to_delay() {
        let request = ChaosRequest {
            slow_ms: 250,
            ..Default::default()
        };
        assert_eq!(request.to_config().delay, Duration::from_millis(250));
    }

    #[test]
    fn drop_percent_maps_to_drop_rate() {
        let request = ChaosRequest {
            drop_percent: 30,
            ..Default::default()
        };
        assert_eq!(request.to_config().drop_rate, 30);
    }

    #[test]
    fn duration_sets_expiry_in_the_future() {
        let request = ChaosRequest {
            duration_sec: 60,
            ..Default::default()
        };
        let before = Utc::now();
        let config = request.to_config();
        let expires_at = config.expires_at.unwrap();
        assert!(expires_at >= before + TimeDelta::seconds(59));
        assert!(expires_at <= Utc::now() + TimeDelta::seconds(61));
    }

    #[test]
    fn zero_duration_means_manual_recovery() {
        let request = ChaosRequest::default();
        assert!(request.to_config().expires_at.is_none());
    }

    #[test]
    fn empty_route_filter_is_dropped() {
        let request = ChaosRequest {
            route: Some(String::new()),
            ..Default::default()
        };
        assert!(request.to_config().route.is_none());

        let request = ChaosRequest {
            route: Some("/users".to_string()),
            ..Default::default()
        };
        assert_eq!(request.to_config().route.as_deref(), Some("/users"));
    }

    #[test]
    fn request_validation_rejects_oversized_percent() {
        let request = ChaosRequest {
            drop_percent: 101,
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = ChaosRequest {
            drop_percent: 100,
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn request_deserializes_with_all_fields_defaulted() {
        let request: ChaosRequest = serde_json::from_str("{}").unwrap();
        assert!(!request.fail_backend);
        assert_eq!(request.slow_ms, 0);
        assert_eq!(request.drop_percent, 0);
        assert_eq!(request.duration_sec, 0);
        assert!(request.route.is_none());
    }
}
