//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "BAGGAGE_RELAY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration for the current process.
///
/// Reads the TOML file named by `BAGGAGE_RELAY_CONFIG` when set,
/// otherwise starts from defaults, then applies environment overrides.
pub fn load() -> Result<RelayConfig, ConfigError> {
    let mut config = match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => load_file(Path::new(&path))?,
        Err(_) => RelayConfig::default(),
    };
    apply_env(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Load and parse configuration from a TOML file.
pub fn load_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RelayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Apply environment overrides. Takes the lookup as a function so tests
/// can drive it without mutating process-global state.
pub fn apply_env(config: &mut RelayConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup("AMQP_URL") {
        config.queue.url = url;
    }
    if let Some(name) = lookup("QUEUE_NAME") {
        config.queue.queue_name = name;
    }
    if let Some(url) = lookup("DOWNSTREAM_URL") {
        config.downstream.base_url = url;
    }
    if let Some(addr) = lookup("LISTEN_ADDR") {
        config.receiver.listen_addr = addr;
    }
    if let Some(count) = lookup("MESSAGE_COUNT").and_then(|v| v.parse().ok()) {
        config.producer.message_count = count;
    }
}
