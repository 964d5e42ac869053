//! Context propagation core.
//!
//! # Responsibilities
//! - Represent the propagated context (baggage + trace reference)
//! - Encode/decode contexts to a transport-agnostic carrier map
//!
//! # Design Decisions
//! - Contexts are explicit values passed through the call chain, never
//!   ambient thread-local state, so propagation stays deterministic
//! - Decoding is best-effort: unknown or malformed carrier keys are
//!   dropped silently and never fail the business operation

pub mod carrier;
pub mod context;

pub use carrier::{decode, encode, Carrier};
pub use context::{Context, TraceRef};
