//! Immutable propagation context values.

use std::collections::HashMap;

/// Opaque trace correlation identifiers carried alongside baggage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRef {
    pub trace_id: String,
    pub span_id: String,
}

/// An immutable snapshot of propagated request metadata.
///
/// A context holds a set of baggage entries (unique string keys) and an
/// optional trace reference. "Setting" an entry produces a new value;
/// existing contexts are never mutated in place. One context exists per
/// logical unit of work (one per produced message, one per consumed
/// message) and is discarded when that unit completes.
///
/// Baggage keys are lower-cased on insertion so that a context survives
/// transports that normalize header-name case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    baggage: HashMap<String, String>,
    trace: Option<TraceRef>,
}

impl Context {
    /// Create an empty context: no baggage, no trace reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new context with the given baggage entry added.
    /// An existing entry under the same (lower-cased) key is replaced.
    pub fn with_entry(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.baggage
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Return a new context carrying the given trace reference.
    pub fn with_trace(mut self, trace: TraceRef) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Look up a baggage entry by key (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.baggage
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// All baggage entries. No ordering guarantee.
    pub fn baggage(&self) -> &HashMap<String, String> {
        &self.baggage
    }

    pub fn trace(&self) -> Option<&TraceRef> {
        self.trace.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.baggage.is_empty() && self.trace.is_none()
    }

    pub fn baggage_len(&self) -> usize {
        self.baggage.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_entry_produces_new_value() {
        let base = Context::new();
        let derived = base.clone().with_entry("user.id", "user-1001");

        assert!(base.is_empty());
        assert_eq!(derived.get("user.id"), Some("user-1001"));
    }

    #[test]
    fn keys_are_case_normalized() {
        let ctx = Context::new().with_entry("User.Id", "u1");
        assert_eq!(ctx.get("user.id"), Some("u1"));
        assert_eq!(ctx.get("USER.ID"), Some("u1"));
    }

    #[test]
    fn duplicate_key_replaces_entry() {
        let ctx = Context::new()
            .with_entry("source", "first")
            .with_entry("source", "second");
        assert_eq!(ctx.baggage_len(), 1);
        assert_eq!(ctx.get("source"), Some("second"));
    }

    #[test]
    fn trace_ref_is_preserved() {
        let ctx = Context::new().with_trace(TraceRef {
            trace_id: "abc123".into(),
            span_id: "def456".into(),
        });
        assert_eq!(ctx.trace().map(|t| t.trace_id.as_str()), Some("abc123"));
    }
}
