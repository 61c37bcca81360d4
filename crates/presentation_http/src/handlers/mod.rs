//! HTTP request handlers

pub mod analytics;
pub mod chaos_admin;
pub mod health;
pub mod metrics;
pub mod proxy;
