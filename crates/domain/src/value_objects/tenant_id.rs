//! Tenant identifier value object
//!
//! Tenants are isolated organizational units fronted by the gateway. Each
//! tenant has its own API key, rate-limit budget, and analytics counters.
//! Tenant identifiers are short slugs (`tenant-a`, `acme_prod`) rather than
//! UUIDs so they stay readable in metric keys and log lines.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Maximum accepted slug length
const MAX_LEN: usize = 64;

/// A unique tenant identifier
///
/// # Examples
///
/// ```
/// use domain::TenantId;
///
/// let id = TenantId::parse("tenant-a").unwrap();
/// assert_eq!(id.as_str(), "tenant-a");
/// assert!(TenantId::parse("no spaces").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Parse a tenant ID from a string slug
    ///
    /// Accepts non-empty ASCII alphanumerics plus `-` and `_`, up to 64
    /// characters.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.is_empty() || s.len() > MAX_LEN {
            return Err(DomainError::InvalidTenantId(s.to_string()));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidTenantId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TenantId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<TenantId> for String {
    fn from(id: TenantId) -> Self {
        id.0
    }
}
