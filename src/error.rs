//! Error taxonomy for the relay pipelines.

use thiserror::Error;

/// Errors that can occur while producing, consuming, or relaying messages.
///
/// Carrier decode anomalies are deliberately absent: unrecognized carrier
/// keys degrade silently inside the codec and never surface as errors.
#[derive(Debug, Error)]
pub enum RelayError {
    /// All connection attempts to the broker failed. Fatal at startup
    /// for both producer and consumer.
    #[error("broker connection exhausted after {attempts} attempts: {last_error}")]
    ConnectionExhausted { attempts: u32, last_error: String },

    /// Inbound message body is not the expected JSON shape. Resolved by
    /// rejecting the delivery with requeue; never fatal.
    #[error("malformed payload: {0}")]
    MalformedPayload(serde_json::Error),

    /// Outbound payload could not be serialized. Aborts the producer run.
    #[error("payload encoding failed: {0}")]
    Encode(serde_json::Error),

    /// Downstream HTTP call failed: transport error, non-2xx status, or
    /// unparseable body. All three collapse into one signal; the caller
    /// requeues regardless of which occurred.
    #[error("downstream call failed: {0}")]
    DownstreamFailure(String),

    /// AMQP channel or publish operation failed.
    #[error("queue operation failed: {0}")]
    Queue(#[from] lapin::Error),
}
