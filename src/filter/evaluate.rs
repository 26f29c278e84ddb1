//! The evaluator: AND every active predicate over every record, preserve
//! source order, never fail.
//!
//! Complexity is O(records × predicates) by design; inputs are small and
//! bounded. A malformed or absent field degrades to "does not match" for
//! that predicate only — one bad record never fails the evaluation.

use chrono::NaiveDate;

use crate::core::config::{BucketConfig, Config, RecencyConfig};
use crate::filter::predicate::{FilterPredicate, FilterQuery, RecencyWindow, SizeBucket};
use crate::filter::record::{FieldValue, Record, RecordSet};

/// Everything the evaluator needs besides the records and the query:
/// bucket thresholds, window widths, and the explicit reference date for
/// recency — never the wall clock implicitly, so evaluation stays
/// deterministic and testable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalContext {
    /// Size-bucket thresholds.
    pub buckets: BucketConfig,
    /// Width of the week window, in days.
    pub week_days: i64,
    /// Width of the month window, in days.
    pub month_days: i64,
    /// "Now" for recency windows.
    pub reference_date: NaiveDate,
}

impl EvalContext {
    /// Build from config sections plus an explicit reference date
    /// (config's own `reference_date` wins when set).
    #[must_use]
    pub fn from_config(config: &Config, fallback_reference: NaiveDate) -> Self {
        Self {
            buckets: config.buckets,
            week_days: config.recency.week_days,
            month_days: config.recency.month_days,
            reference_date: config.recency.reference_date.unwrap_or(fallback_reference),
        }
    }

    /// Context with default thresholds and the given reference date.
    #[must_use]
    pub fn with_reference(reference_date: NaiveDate) -> Self {
        let recency = RecencyConfig::default();
        Self {
            buckets: BucketConfig::default(),
            week_days: recency.week_days,
            month_days: recency.month_days,
            reference_date,
        }
    }
}

/// Evaluate `query` over `records`, returning the ordered subsequence of
/// matching records. The empty query is the identity.
#[must_use]
pub fn evaluate(records: &RecordSet, query: &FilterQuery, ctx: &EvalContext) -> RecordSet {
    if query.is_empty() {
        return records.clone();
    }
    records
        .iter()
        .filter(|record| query.iter().all(|p| matches(record, p, ctx)))
        .cloned()
        .collect()
}

/// Test one predicate against one record.
#[must_use]
pub fn matches(record: &Record, predicate: &FilterPredicate, ctx: &EvalContext) -> bool {
    match predicate {
        FilterPredicate::ColumnContains { column, value } => {
            if value.is_empty() {
                return true;
            }
            record
                .get(column)
                .is_some_and(|field| contains_ci(&field.search_text(), value))
        }
        FilterPredicate::GlobalContains { value, fields } => {
            if value.is_empty() {
                return true;
            }
            fields.iter().any(|name| {
                record
                    .get(name)
                    .is_some_and(|field| contains_ci(&field.search_text(), value))
            })
        }
        FilterPredicate::CategoricalRange { field, bucket } => record
            .get(field)
            .and_then(FieldValue::as_number)
            .is_some_and(|n| bucket_matches(n, *bucket, ctx.buckets)),
        FilterPredicate::RelativeTime { field, window } => record
            .get(field)
            .and_then(FieldValue::as_date)
            .is_some_and(|d| window_matches(d, *window, ctx)),
    }
}

/// Case-insensitive, locale-naive substring test.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn bucket_matches(value: f64, bucket: SizeBucket, thresholds: BucketConfig) -> bool {
    match bucket {
        SizeBucket::Small => value <= thresholds.small_max,
        SizeBucket::Medium => value > thresholds.small_max && value <= thresholds.medium_max,
        SizeBucket::Large => value > thresholds.medium_max,
    }
}

fn window_matches(date: NaiveDate, window: RecencyWindow, ctx: &EvalContext) -> bool {
    let days_ago = (ctx.reference_date - date).num_days();
    match window {
        RecencyWindow::PastWeek => days_ago <= ctx.week_days,
        RecencyWindow::PastMonth => days_ago <= ctx.month_days,
        RecencyWindow::Older => days_ago > ctx.month_days,
    }
}
