//! Domain layer for Faultline
//!
//! Contains the core gateway vocabulary: tenants, the chaos fault-injection
//! data model, decision-log event kinds, and domain errors. This layer has no
//! async code and no I/O.

pub mod chaos;
pub mod decision;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use chaos::{ChaosConfig, ChaosStats};
pub use decision::{ChaosType, DecisionKind};
pub use entities::Tenant;
pub use errors::DomainError;
pub use value_objects::TenantId;
