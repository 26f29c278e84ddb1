//! Linear facet filtering: immutable record sets, tagged predicates, and
//! an order-preserving AND evaluator.
//!
//! Records and predicate counts are small and bounded, so there is no
//! indexing and no memoization.

pub mod evaluate;
pub mod predicate;
pub mod record;

pub use evaluate::{EvalContext, evaluate};
pub use predicate::{FilterPredicate, FilterQuery, RecencyWindow, SizeBucket};
pub use record::{FieldValue, Record, RecordSet};
