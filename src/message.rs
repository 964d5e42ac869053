//! Wire shapes shared by the producer, consumer, and receiver roles.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Payload of one queue message: a small JSON document published by the
/// producer and parsed back by the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueMessage {
    pub id: u64,
    /// ISO-8601 timestamp of when the message was produced.
    pub timestamp: String,
    pub data: String,
}

/// Body of the downstream `POST /process` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub message_id: u64,
    pub timestamp: String,
    pub data: String,
}

impl ProcessRequest {
    pub fn from_message(message: &QueueMessage) -> Self {
        Self {
            message_id: message.id,
            timestamp: message.timestamp.clone(),
            data: message.data.clone(),
        }
    }
}

/// Body of the downstream `POST /process` response. `baggage_received`
/// echoes the baggage entries the receiver observed in the request
/// headers, making end-to-end propagation visible to the consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub success: bool,
    pub message_id: u64,
    /// ISO-8601 timestamp of when the receiver handled the request.
    pub processed_at: String,
    pub baggage_received: HashMap<String, String>,
}
