//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use friction_lab::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{FrlError, Result};
pub use crate::core::mode::Mode;

// Scheduler
pub use crate::scheduler::deferred::{ActionId, DeferredScheduler, DeferredState};
pub use crate::scheduler::delay::DelayRange;
pub use crate::scheduler::interval::PeriodicTicker;

// Filter
pub use crate::filter::evaluate::{EvalContext, evaluate};
pub use crate::filter::predicate::{FilterPredicate, FilterQuery, RecencyWindow, SizeBucket};
pub use crate::filter::record::{FieldValue, Record, RecordSet};

// Catalog
pub use crate::catalog::registry::{DemoCatalog, DemoEntry, DemoKind};

// Sessions
pub use crate::session::autosave::{DraftEvent, DraftSession};
pub use crate::session::interrupt::{InterruptEvent, InterruptSession, Interruption};
