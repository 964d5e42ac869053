//! Broker connection with bounded, fixed-backoff retry.

use std::future::Future;
use std::time::Duration;

use lapin::{Connection, ConnectionProperties};

use crate::error::RelayError;

/// Connect to the AMQP broker, retrying with a constant delay.
///
/// Attempts are sequential; each failure is logged with its attempt
/// number before the next try. After `max_attempts` total failures the
/// call resolves to [`RelayError::ConnectionExhausted`], which callers
/// treat as fatal.
pub async fn connect(
    url: &str,
    max_attempts: u32,
    delay: Duration,
) -> Result<Connection, RelayError> {
    retry_connect(max_attempts, delay, || {
        Connection::connect(url, ConnectionProperties::default())
    })
    .await
}

/// Retry core, generic over the dial operation so the bounded-attempts
/// contract is testable without a live broker.
pub(crate) async fn retry_connect<T, E, F, Fut>(
    max_attempts: u32,
    delay: Duration,
    mut dial: F,
) -> Result<T, RelayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    // At least one attempt, even with a zero bound.
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match dial().await {
            Ok(connection) => {
                tracing::info!(attempt, "Connected to broker");
                return Ok(connection);
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    "Broker connection attempt failed"
                );
                if attempt >= max_attempts {
                    return Err(RelayError::ConnectionExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
                tokio::time::sleep(delay).await;
            }
        }
    }
}
