//! Observability
//!
//! Structured logging for query lifecycle events: one JSON line per
//! event, synchronous, deterministic field order.

mod logger;

pub use logger::{Logger, Severity};
