//! Hosting sessions: the per-demo state machines that own a scheduler,
//! a mode, and the draft state the user is about to lose.
//!
//! Each session owns its timers exclusively; switching modes or dropping
//! a session tears every pending timer down, so nothing can fire into a
//! context that is no longer live.

pub mod autosave;
pub mod interrupt;

pub use autosave::{DraftEvent, DraftSession};
pub use interrupt::{InterruptEvent, Interruption, InterruptSession};
