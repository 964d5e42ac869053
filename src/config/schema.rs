//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from an optional
//! TOML file; every field has a working default so the demo runs with no
//! configuration at all. Environment overrides are applied on top by the
//! loader.

use serde::{Deserialize, Serialize};

/// Root configuration shared by all three roles.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Queue broker connection and declaration settings.
    pub queue: QueueConfig,

    /// Producer batch settings.
    pub producer: ProducerConfig,

    /// Downstream HTTP service settings (consumer side).
    pub downstream: DownstreamConfig,

    /// HTTP receiver settings (serve role).
    pub receiver: ReceiverConfig,
}

/// Queue broker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueueConfig {
    /// AMQP broker URL. Env override: `AMQP_URL`.
    pub url: String,

    /// Name of the (non-durable) queue. Env override: `QUEUE_NAME`.
    pub queue_name: String,

    /// Total connection attempts before giving up.
    pub connect_attempts: u32,

    /// Constant delay between connection attempts, in milliseconds.
    pub connect_delay_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            url: "amqp://127.0.0.1:5672/%2f".to_string(),
            queue_name: "demo-queue".to_string(),
            connect_attempts: 5,
            connect_delay_ms: 2_000,
        }
    }
}

/// Producer batch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProducerConfig {
    /// Number of messages published per run.
    pub message_count: u64,

    /// Delay between publishes, in milliseconds. Keeps the demonstration
    /// output human-observable; not a throughput knob.
    pub publish_delay_ms: u64,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            message_count: 5,
            publish_delay_ms: 1_000,
        }
    }
}

/// Downstream HTTP service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Base URL of the receiver service. Env override: `DOWNSTREAM_URL`.
    pub base_url: String,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
        }
    }
}

/// HTTP receiver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Listen address. Env override: `LISTEN_ADDR`.
    pub listen_addr: String,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
        }
    }
}
