//! Consumer pipeline.
//!
//! Each delivery moves through a small state machine:
//!
//! ```text
//! RECEIVED → CONTEXT_DECODED → DOWNSTREAM_CALLED → { ACKED | NACKED }
//! ```
//!
//! # Responsibilities
//! - Parse each queue message payload into the expected JSON shape
//! - Decode the delivery's carrier into an active context
//! - Invoke the downstream adapter with message and context
//! - Resolve the delivery exactly once: ack on success, nack with
//!   requeue on any failure
//!
//! # Design Decisions
//! - The ack/nack decision is a total function over the inputs, so every
//!   delivery reaches exactly one terminal resolution even when parsing
//!   or the downstream call fails
//! - A malformed payload is nacked without attempting the downstream call
//! - Requeueing is unbounded: there is no dead-letter or poison-message
//!   cap, a known limitation of this design
//! - Per-message failures never terminate the consumer process; only
//!   connection exhaustion at startup is fatal

use std::time::Duration;

use futures_util::StreamExt;
use lapin::options::{BasicAckOptions, BasicNackOptions};

use crate::config::RelayConfig;
use crate::downstream::{DownstreamCall, HttpDownstream};
use crate::error::RelayError;
use crate::message::QueueMessage;
use crate::propagation::{self, Carrier};
use crate::queue::session::headers_to_carrier;
use crate::queue::{self, Session};

/// Terminal resolution of one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Remove the message from the queue permanently.
    Ack,
    /// Return the message to the queue for redelivery.
    NackRequeue,
}

/// Run one delivery through the state machine and decide its resolution.
///
/// Total: never fails, never resolves anything itself. The caller applies
/// the returned resolution to the delivery handle exactly once.
pub async fn process_delivery<D: DownstreamCall>(
    payload: &[u8],
    carrier: &Carrier,
    downstream: &D,
) -> Resolution {
    // RECEIVED: parse the payload
    let message: QueueMessage = match serde_json::from_slice(payload) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(
                error = %RelayError::MalformedPayload(e),
                "Rejecting message with undecodable payload"
            );
            return Resolution::NackRequeue;
        }
    };

    // CONTEXT_DECODED: best-effort, an absent carrier yields an empty
    // context and processing continues
    let context = propagation::decode(carrier);
    tracing::info!(
        message_id = message.id,
        baggage_entries = context.baggage_len(),
        has_trace = context.trace().is_some(),
        "Decoded propagation context from delivery"
    );

    // DOWNSTREAM_CALLED
    match downstream.call(&message, &context).await {
        Ok(response) => {
            tracing::info!(
                message_id = message.id,
                processed_at = %response.processed_at,
                baggage_received = response.baggage_received.len(),
                "Downstream call succeeded, acking"
            );
            Resolution::Ack
        }
        Err(e) => {
            tracing::warn!(
                message_id = message.id,
                error = %e,
                "Downstream call failed, nacking with requeue"
            );
            Resolution::NackRequeue
        }
    }
}

/// Run the consumer role: connect, declare, then process deliveries until
/// the consume stream ends.
pub async fn run(config: &RelayConfig) -> Result<(), RelayError> {
    let connection = queue::connect(
        &config.queue.url,
        config.queue.connect_attempts,
        Duration::from_millis(config.queue.connect_delay_ms),
    )
    .await?;
    let session = Session::open(&connection, &config.queue.queue_name).await?;
    let downstream = HttpDownstream::new(config.downstream.base_url.clone());

    let mut consumer = session.consume("baggage-relay-consumer").await?;
    tracing::info!(
        queue = %session.queue_name(),
        downstream = %config.downstream.base_url,
        "Consumer started, waiting for messages"
    );

    while let Some(delivery) = consumer.next().await {
        let delivery = match delivery {
            Ok(delivery) => delivery,
            Err(e) => {
                tracing::error!(error = %e, "Error on consume stream");
                continue;
            }
        };

        tracing::info!(
            delivery_tag = delivery.delivery_tag,
            bytes = delivery.data.len(),
            "Received delivery"
        );

        let carrier = headers_to_carrier(delivery.properties.headers().as_ref());
        let resolution = process_delivery(&delivery.data, &carrier, &downstream).await;

        let resolved = match resolution {
            Resolution::Ack => delivery.ack(BasicAckOptions::default()).await,
            Resolution::NackRequeue => {
                delivery
                    .nack(BasicNackOptions {
                        requeue: true,
                        ..BasicNackOptions::default()
                    })
                    .await
            }
        };
        if let Err(e) = resolved {
            tracing::error!(error = %e, resolution = ?resolution, "Failed to resolve delivery");
        }
    }

    tracing::info!("Consume stream closed");
    Ok(())
}
