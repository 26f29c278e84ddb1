//! Deferred action scheduling: single-shot cancellable timers with
//! arm-time mode capture, randomized delay ranges, and periodic tickers.

pub mod deferred;
pub mod delay;
pub mod interval;
