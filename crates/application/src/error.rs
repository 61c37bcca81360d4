//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Synthetic chaos outcomes are deliberately absent here: an injected failure
/// or drop is a designed response produced at the HTTP boundary, not an
/// error that propagates through the application.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Rate limit exceeded for a tenant
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Upstream backend could not be reached or answered malformed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
