#![forbid(unsafe_code)]

//! Friction Lab (frl) — a catalog of side-by-side "bad UX vs. good UX"
//! demonstrations, reduced to the two mechanisms every demo is built on:
//!
//! 1. **Deferred Action Scheduler** — a single-shot, cancellable delayed
//!    action that captures its mode at arm time (`Idle → Armed →
//!    {Fired | Cancelled}`)
//! 2. **Facet Filter Evaluator** — AND-composed predicates over small
//!    immutable in-memory record sets, order-preserving
//!
//! Hosting sessions ([`session`]) wire the mechanisms into the demo
//! semantics (interrupt traps, crash/autosave drafts); the [`catalog`]
//! names the demos and carries their sample data.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use friction_lab::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use friction_lab::core::config::Config;
//! use friction_lab::scheduler::deferred::DeferredScheduler;
//! ```

pub mod prelude;

pub mod catalog;
pub mod core;
pub mod filter;
pub mod logger;
pub mod scheduler;
pub mod session;
