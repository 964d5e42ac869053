//! Producer pipeline.
//!
//! # Responsibilities
//! - Build one context per message with the demo baggage entries
//! - Encode the context and publish payload plus carrier to the queue
//! - Pace publishes with a fixed delay so the propagation chain is easy
//!   to follow in the logs
//!
//! # Design Decisions
//! - One-shot: publishes a fixed batch then exits
//! - A publish failure aborts the rest of the batch; already-published
//!   messages are not rolled back (queue publish has no compensating
//!   action)

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::message::QueueMessage;
use crate::propagation::{self, Context};
use crate::queue::{self, Session};

/// Static source tag stamped into every produced context.
const SOURCE_TAG: &str = "baggage-relay-producer";

/// Run the producer role: connect, then publish the configured batch.
pub async fn run(config: &RelayConfig) -> Result<(), RelayError> {
    let connection = queue::connect(
        &config.queue.url,
        config.queue.connect_attempts,
        Duration::from_millis(config.queue.connect_delay_ms),
    )
    .await?;
    let session = Session::open(&connection, &config.queue.queue_name).await?;

    // Unique per producer run; ties the batch together in the receiver's logs.
    let session_id = Uuid::new_v4().to_string();
    let count = config.producer.message_count;
    let delay = Duration::from_millis(config.producer.publish_delay_ms);

    tracing::info!(
        queue = %session.queue_name(),
        count,
        session_id = %session_id,
        "Producer starting"
    );

    for number in 1..=count {
        let context = build_context(&session_id, number);
        let message = QueueMessage {
            id: number,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            data: format!("Message {number}"),
        };
        let payload = serde_json::to_vec(&message).map_err(RelayError::Encode)?;
        let carrier = propagation::encode(&context);

        session.publish(&payload, &carrier).await?;
        tracing::info!(
            message_id = number,
            baggage_entries = context.baggage_len(),
            "Published message with baggage"
        );

        if number < count {
            tokio::time::sleep(delay).await;
        }
    }

    tracing::info!(count, "Producer run complete");
    Ok(())
}

/// Baggage for message `number`: synthetic user id, static source tag,
/// per-run session id, and the sequence number as a string.
fn build_context(session_id: &str, number: u64) -> Context {
    Context::new()
        .with_entry("user.id", format!("user-{}", 1000 + number))
        .with_entry("source", SOURCE_TAG)
        .with_entry("session.id", session_id)
        .with_entry("message.number", number.to_string())
}
