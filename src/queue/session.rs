//! Channel wrapper for publishing and consuming on the demo queue.

use lapin::options::{BasicConsumeOptions, BasicPublishOptions, QueueDeclareOptions};
use lapin::types::{AMQPValue, FieldTable};
use lapin::{BasicProperties, Channel, Connection, Consumer};

use crate::error::RelayError;
use crate::propagation::Carrier;

/// One channel bound to one named queue.
///
/// Structural operations (declaring) happen once during `open`; publish,
/// ack, and nack may then be issued freely from the event loop.
pub struct Session {
    channel: Channel,
    queue_name: String,
}

impl Session {
    /// Create a channel and declare the queue. Declaration is idempotent:
    /// identical parameters are used on every call, so re-opening against
    /// an existing queue is a no-op on the broker.
    pub async fn open(connection: &Connection, queue_name: &str) -> Result<Self, RelayError> {
        let channel = connection.create_channel().await?;
        let session = Self {
            channel,
            queue_name: queue_name.to_string(),
        };
        session.declare().await?;
        Ok(session)
    }

    /// Declare the queue: non-durable, non-exclusive, no auto-delete.
    pub async fn declare(&self) -> Result<(), RelayError> {
        self.channel
            .queue_declare(
                &self.queue_name,
                QueueDeclareOptions::default(),
                FieldTable::default(),
            )
            .await?;
        tracing::debug!(queue = %self.queue_name, "Queue declared");
        Ok(())
    }

    /// Publish a payload with the carrier embedded in the message header
    /// table, waiting for the broker to take the message.
    pub async fn publish(&self, payload: &[u8], carrier: &Carrier) -> Result<(), RelayError> {
        let properties = BasicProperties::default()
            .with_content_type("application/json".to_string().into())
            .with_headers(carrier_to_headers(carrier));

        self.channel
            .basic_publish(
                "",
                &self.queue_name,
                BasicPublishOptions::default(),
                payload,
                properties,
            )
            .await?
            .await?;
        Ok(())
    }

    /// Start consuming from the queue. Each yielded delivery carries its
    /// own acker; resolution of one delivery never affects another.
    pub async fn consume(&self, consumer_tag: &str) -> Result<Consumer, RelayError> {
        let consumer = self
            .channel
            .basic_consume(
                &self.queue_name,
                consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;
        Ok(consumer)
    }

    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }
}

/// Inject a carrier into an AMQP header table. Values become long
/// strings, the only header type the decoder reads back.
fn carrier_to_headers(carrier: &Carrier) -> FieldTable {
    let mut table = FieldTable::default();
    for (key, value) in carrier {
        table.insert(key.clone().into(), AMQPValue::LongString(value.clone().into()));
    }
    table
}

/// Extract a carrier from an AMQP header table. Non-string header values
/// are skipped; an absent table yields an empty carrier.
pub fn headers_to_carrier(headers: Option<&FieldTable>) -> Carrier {
    let mut carrier = Carrier::new();
    if let Some(table) = headers {
        for (key, value) in table.inner() {
            if let AMQPValue::LongString(s) = value {
                carrier.insert(key.as_str().to_string(), s.to_string());
            }
        }
    }
    carrier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_table_round_trips_carrier() {
        let mut carrier = Carrier::new();
        carrier.insert("baggage-user.id".into(), "user-1001".into());
        carrier.insert("baggage-note".into(), "".into());
        carrier.insert("trace-id".into(), "deadbeef".into());

        let table = carrier_to_headers(&carrier);
        assert_eq!(headers_to_carrier(Some(&table)), carrier);
    }

    #[test]
    fn absent_header_table_yields_empty_carrier() {
        assert!(headers_to_carrier(None).is_empty());
    }

    #[test]
    fn non_string_header_values_are_skipped() {
        let mut table = FieldTable::default();
        table.insert("x-retries".to_string().into(), AMQPValue::LongInt(3));
        table.insert(
            "baggage-user.id".to_string().into(),
            AMQPValue::LongString("u1".to_string().into()),
        );

        let carrier = headers_to_carrier(Some(&table));
        assert_eq!(carrier.len(), 1);
        assert_eq!(carrier.get("baggage-user.id").map(String::as_str), Some("u1"));
    }
}
