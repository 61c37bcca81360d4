//! Tenant resolution
//!
//! API keys map to tenants through a static registry built from
//! configuration at startup. Lookup is the entire resolution story; key
//! issuance and rotation belong to an external control plane.

use std::collections::HashMap;

use domain::Tenant;

/// Static API-key-to-tenant registry
#[derive(Debug, Clone, Default)]
pub struct TenantRegistry {
    by_api_key: HashMap<String, Tenant>,
}

impl TenantRegistry {
    /// Build a registry from `(api_key, tenant)` pairs
    ///
    /// Later duplicates of an API key replace earlier ones.
    pub fn new(entries: impl IntoIterator<Item = (String, Tenant)>) -> Self {
        Self {
            by_api_key: entries.into_iter().collect(),
        }
    }

    /// Resolve an API key to its tenant
    pub fn resolve(&self, api_key: &str) -> Option<&Tenant> {
        self.by_api_key.get(api_key)
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.by_api_key.len()
    }

    /// Whether the registry has no keys
    pub fn is_empty(&self) -> bool {
        self.by_api_key.is_empty()
    }
}
