//! Baggage propagation demo: queue hop to HTTP hop

// Propagation core
pub mod message;
pub mod propagation;

// Roles
pub mod consumer;
pub mod producer;
pub mod receiver;

// Transports
pub mod downstream;
pub mod queue;

// Cross-cutting concerns
pub mod config;
pub mod error;

pub use config::RelayConfig;
pub use error::RelayError;
pub use propagation::{Context, TraceRef};
