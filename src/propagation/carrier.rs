//! Carrier codec: flat string-map wire form of a [`Context`].
//!
//! A carrier is what actually crosses a transport boundary, embedded in
//! AMQP message headers on the queue hop and HTTP headers on the
//! downstream hop. Each baggage entry maps to one carrier key under a
//! stable prefix; the trace reference uses two well-known keys.

use std::collections::HashMap;

use crate::propagation::context::{Context, TraceRef};

/// Flat string-keyed wire representation of a context.
pub type Carrier = HashMap<String, String>;

/// Prefix for carrier keys holding baggage entries.
pub const BAGGAGE_PREFIX: &str = "baggage-";

/// Well-known carrier key for the trace identifier.
pub const TRACE_ID_KEY: &str = "trace-id";

/// Well-known carrier key for the span identifier.
pub const SPAN_ID_KEY: &str = "span-id";

/// Flatten a context into a carrier. Pure: the same context always
/// yields the same carrier.
pub fn encode(context: &Context) -> Carrier {
    let mut carrier = Carrier::new();
    for (key, value) in context.baggage() {
        carrier.insert(format!("{BAGGAGE_PREFIX}{key}"), value.clone());
    }
    if let Some(trace) = context.trace() {
        carrier.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
        carrier.insert(SPAN_ID_KEY.to_string(), trace.span_id.clone());
    }
    carrier
}

/// Rebuild a context from a carrier.
///
/// Best-effort by contract: unknown keys are ignored, a trace reference
/// missing either identifier is dropped, and an empty carrier decodes to
/// the empty context. This function never fails.
pub fn decode(carrier: &Carrier) -> Context {
    let mut context = Context::new();
    let mut trace_id = None;
    let mut span_id = None;
    for (key, value) in carrier {
        let key = key.to_ascii_lowercase();
        if let Some(baggage_key) = key.strip_prefix(BAGGAGE_PREFIX) {
            if baggage_key.is_empty() {
                continue;
            }
            context = context.with_entry(baggage_key, value.clone());
        } else if key == TRACE_ID_KEY {
            trace_id = Some(value.clone());
        } else if key == SPAN_ID_KEY {
            span_id = Some(value.clone());
        }
    }
    if let (Some(trace_id), Some(span_id)) = (trace_id, span_id) {
        context = context.with_trace(TraceRef { trace_id, span_id });
    }
    context
}
