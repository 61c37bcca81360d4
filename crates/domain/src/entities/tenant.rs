//! Tenant entity

use serde::{Deserialize, Serialize};

use crate::value_objects::TenantId;

/// A tenant known to the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Stable tenant identifier, used as the label in metrics and analytics
    pub id: TenantId,
    /// Human-readable display name
    pub name: String,
}

impl Tenant {
    /// Create a new tenant
    pub fn new(id: TenantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
