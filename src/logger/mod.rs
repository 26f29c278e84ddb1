//! Structured activity logging.

pub mod jsonl;

pub use jsonl::{EventType, JsonlWriter, LogEntry, Severity};
