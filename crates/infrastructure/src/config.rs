//! Application configuration
//!
//! Typed configuration with serde defaults, loadable from an optional
//! `gateway.toml` file with `FAULTLINE_*` environment overrides. The
//! defaults describe the self-contained demo topology: two local mock
//! backends and two test tenants.

use application::{BackendRoute, TenantRegistry};
use domain::{Tenant, TenantId};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Backends fronted by the gateway, in route-match order
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendConfig>,

    /// Per-tenant rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Chaos auto-recovery scheduler
    #[serde(default)]
    pub chaos: ChaosSchedulerConfig,

    /// Tenants and their API keys
    #[serde(default = "default_tenants")]
    pub tenants: Vec<TenantEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            backends: default_backends(),
            rate_limit: RateLimitConfig::default(),
            chaos: ChaosSchedulerConfig::default(),
            tenants: default_tenants(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_secs: None,
            log_format: default_log_format(),
        }
    }
}

/// One proxied backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Path prefix served by this backend
    pub route: String,
    /// Base URL requests are forwarded to
    pub upstream_url: String,
}

/// Per-tenant rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Requests allowed per tenant per window
    #[serde(default = "default_rate_limit")]
    pub requests_per_window: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_window: default_rate_limit(),
            window_secs: default_window_secs(),
        }
    }
}

/// Chaos auto-recovery scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaosSchedulerConfig {
    /// Seconds between expiry checks
    #[serde(default = "default_recovery_interval")]
    pub recovery_interval_secs: u64,
}

impl Default for ChaosSchedulerConfig {
    fn default() -> Self {
        Self {
            recovery_interval_secs: default_recovery_interval(),
        }
    }
}

/// One tenant and its API key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantEntry {
    /// API key presented in `X-Api-Key`
    pub api_key: String,
    /// Tenant identifier slug
    pub id: String,
    /// Display name
    pub name: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_rate_limit() -> u32 {
    5
}

const fn default_window_secs() -> u64 {
    60
}

const fn default_recovery_interval() -> u64 {
    1
}

fn default_backends() -> Vec<BackendConfig> {
    vec![
        BackendConfig {
            route: "/users".to_string(),
            upstream_url: "http://localhost:9001".to_string(),
        },
        BackendConfig {
            route: "/orders".to_string(),
            upstream_url: "http://localhost:9002".to_string(),
        },
    ]
}

fn default_tenants() -> Vec<TenantEntry> {
    vec![
        TenantEntry {
            api_key: "sk_test_123".to_string(),
            id: "tenant-a".to_string(),
            name: "Tenant A".to_string(),
        },
        TenantEntry {
            api_key: "sk_test_456".to_string(),
            id: "tenant-b".to_string(),
            name: "Tenant B".to_string(),
        },
    ]
}

impl AppConfig {
    /// Load configuration from defaults, an optional `gateway.toml`, and
    /// `FAULTLINE_*` environment overrides (e.g. `FAULTLINE_SERVER__PORT`)
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("gateway").required(false))
            .add_source(
                config::Environment::with_prefix("FAULTLINE")
                    .separator("__")
                    .try_parsing(true),
            );

        let loaded = builder.build()?;
        // An empty source set deserializes through the serde defaults
        loaded.try_deserialize()
    }

    /// Build the tenant registry from the configured entries
    ///
    /// Entries with invalid tenant slugs are skipped with a warning rather
    /// than failing startup.
    pub fn tenant_registry(&self) -> TenantRegistry {
        let entries = self.tenants.iter().filter_map(|entry| {
            match TenantId::parse(&entry.id) {
                Ok(id) => Some((
                    entry.api_key.clone(),
                    Tenant::new(id, entry.name.clone()),
                )),
                Err(e) => {
                    tracing::warn!(
                        tenant = %entry.id,
                        error = %e,
                        "Invalid tenant id in configuration, skipping entry"
                    );
                    None
                },
            }
        });
        TenantRegistry::new(entries)
    }

    /// Build the upstream route table from the configured backends
    pub fn backend_routes(&self) -> Vec<BackendRoute> {
        self.backends
            .iter()
            .map(|b| BackendRoute::new(b.route.clone(), b.upstream_url.clone()))
            .collect()
    }
}
