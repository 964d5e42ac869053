//! Queue transport (AMQP via lapin).
//!
//! # Responsibilities
//! - Connect to the broker with bounded retry
//! - Declare the demo queue and publish/consume on it
//! - Translate the propagation carrier to and from AMQP header tables
//!
//! # Design Decisions
//! - Constant (not exponential) retry delay; bounded attempts then fatal
//! - Queue declaration is idempotent: identical parameters every time
//! - One connection and one channel per process, shared by that
//!   process's message handling

pub mod session;
pub mod supervisor;

pub use session::Session;
pub use supervisor::connect;
