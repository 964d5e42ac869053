//! Configuration management.
//!
//! # Data Flow
//! ```text
//! optional TOML file (BAGGAGE_RELAY_CONFIG)
//!     → loader.rs (parse & deserialize, or defaults)
//!     → environment overrides (AMQP_URL, QUEUE_NAME, ...)
//!     → RelayConfig (immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the demo runs with no configuration
//! - Environment variables win over file values

pub mod loader;
pub mod schema;

pub use loader::{load, ConfigError};
pub use schema::RelayConfig;
