//! Application layer - Gateway use cases and orchestration
//!
//! Contains the chaos controller, the metrics collector, tenant and upstream
//! resolution, analytics orchestration, and the port definitions implemented
//! by the infrastructure layer.

pub mod error;
pub mod fault_random;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use fault_random::{FaultRandom, FixedSequenceRandom, SeededRandom, ThreadRngRandom};
pub use ports::*;
pub use services::*;
