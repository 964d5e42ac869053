//! Downstream HTTP call adapter.
//!
//! # Responsibilities
//! - Re-encode the active context into HTTP request headers
//! - POST the message to the receiver's `/process` endpoint
//! - Collapse transport errors, non-2xx statuses, and unparseable
//!   bodies into one failure signal
//!
//! # Design Decisions
//! - The adapter sits behind the `DownstreamCall` trait so the consumer
//!   pipeline can be exercised with scripted outcomes in tests
//! - No request timeout: this mirrors the demonstrated system's current
//!   behavior; production hardening would bound the call
//! - The caller does not distinguish retryable from non-retryable
//!   failures; every failure leads to requeue

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::RelayError;
use crate::message::{ProcessRequest, ProcessResponse, QueueMessage};
use crate::propagation::{self, Context};

/// One downstream request/response exchange carrying a context.
#[allow(async_fn_in_trait)]
pub trait DownstreamCall {
    async fn call(
        &self,
        message: &QueueMessage,
        context: &Context,
    ) -> Result<ProcessResponse, RelayError>;
}

/// HTTP implementation of [`DownstreamCall`] against the receiver service.
pub struct HttpDownstream {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDownstream {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl DownstreamCall for HttpDownstream {
    async fn call(
        &self,
        message: &QueueMessage,
        context: &Context,
    ) -> Result<ProcessResponse, RelayError> {
        let url = format!("{}/process", self.base_url.trim_end_matches('/'));
        let headers = inject_headers(context);

        tracing::debug!(
            message_id = message.id,
            url = %url,
            baggage_entries = context.baggage_len(),
            "Issuing downstream call"
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&ProcessRequest::from_message(message))
            .send()
            .await
            .map_err(|e| RelayError::DownstreamFailure(format!("transport: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::DownstreamFailure(format!(
                "unexpected status {status}"
            )));
        }

        response
            .json::<ProcessResponse>()
            .await
            .map_err(|e| RelayError::DownstreamFailure(format!("response body: {e}")))
    }
}

/// Encode a context into HTTP headers. Entries that cannot form a valid
/// header name or value are dropped silently; propagation is best-effort
/// and must never fail the request itself.
fn inject_headers(context: &Context) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (key, value) in propagation::encode(context) {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            headers.insert(name, value);
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injects_baggage_and_trace_headers() {
        let context = Context::new()
            .with_entry("user.id", "user-1001")
            .with_entry("message.number", "1");
        let headers = inject_headers(&context);

        assert_eq!(
            headers.get("baggage-user.id").and_then(|v| v.to_str().ok()),
            Some("user-1001")
        );
        assert_eq!(
            headers
                .get("baggage-message.number")
                .and_then(|v| v.to_str().ok()),
            Some("1")
        );
    }

    #[test]
    fn invalid_header_material_is_dropped() {
        let context = Context::new()
            .with_entry("bad\nkey", "v")
            .with_entry("bad-value", "line\nbreak")
            .with_entry("good", "v");
        let headers = inject_headers(&context);

        assert_eq!(headers.len(), 1);
        assert!(headers.contains_key("baggage-good"));
    }

    #[test]
    fn empty_context_injects_nothing() {
        assert!(inject_headers(&Context::new()).is_empty());
    }
}
