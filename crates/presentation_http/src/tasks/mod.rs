//! Background tasks for the HTTP presentation layer

mod chaos_recovery;

pub use chaos_recovery::spawn_chaos_recovery_task;
