//! Tagged filter predicates and the AND-composed query.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::FrlError;

/// Named numeric range of a field (thresholds live in the eval context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBucket {
    /// `value <= small_max`
    Small,
    /// `small_max < value <= medium_max`
    Medium,
    /// `value > medium_max`
    Large,
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        })
    }
}

impl FromStr for SizeBucket {
    type Err = FrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(FrlError::InvalidPredicate {
                details: format!("unknown size bucket '{other}'"),
            }),
        }
    }
}

/// Named recency window of a date field, relative to an explicit
/// reference date. Boundaries are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyWindow {
    /// Within `week_days` of the reference date.
    PastWeek,
    /// Within `month_days` of the reference date.
    PastMonth,
    /// Strictly older than `month_days`.
    Older,
}

impl fmt::Display for RecencyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PastWeek => "week",
            Self::PastMonth => "month",
            Self::Older => "older",
        })
    }
}

impl FromStr for RecencyWindow {
    type Err = FrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" | "past_week" => Ok(Self::PastWeek),
            "month" | "past_month" => Ok(Self::PastMonth),
            "older" => Ok(Self::Older),
            other => Err(FrlError::InvalidPredicate {
                details: format!("unknown recency window '{other}'"),
            }),
        }
    }
}

/// One active filter predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterPredicate {
    /// Case-insensitive substring match against one named field.
    /// An empty `value` matches everything.
    ColumnContains {
        /// Field to test.
        column: String,
        /// Needle, matched case-insensitively.
        value: String,
    },
    /// Case-insensitive substring match if ANY listed field contains the
    /// value. An empty `value` matches everything.
    GlobalContains {
        /// Needle, matched case-insensitively.
        value: String,
        /// Fields to search.
        fields: Vec<String>,
    },
    /// Numeric field falls into a named bucket.
    CategoricalRange {
        /// Field to test (must be numeric to match).
        field: String,
        /// Which bucket.
        bucket: SizeBucket,
    },
    /// Date field falls within a named recency window.
    RelativeTime {
        /// Field to test (must be a date to match).
        field: String,
        /// Which window.
        window: RecencyWindow,
    },
}

impl FilterPredicate {
    /// Parse the CLI shorthand `COLUMN=TEXT` into a `ColumnContains`.
    pub fn parse_column_filter(raw: &str) -> Result<Self, FrlError> {
        let (column, value) = raw.split_once('=').ok_or_else(|| FrlError::InvalidPredicate {
            details: format!("expected COLUMN=TEXT, got '{raw}'"),
        })?;
        if column.trim().is_empty() {
            return Err(FrlError::InvalidPredicate {
                details: format!("empty column name in '{raw}'"),
            });
        }
        Ok(Self::ColumnContains {
            column: column.trim().to_string(),
            value: value.to_string(),
        })
    }
}

/// Ordered sequence of active predicates; a record matches iff it matches
/// every one. The empty query matches everything.
pub type FilterQuery = Vec<FilterPredicate>;
