//! The two-valued (occasionally three-valued) demo mode switch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::FrlError;

/// Which rendition of a demo is active.
///
/// Modeled as plain data passed explicitly into scheduler and session call
/// sites: each mode selects one of a fixed set of pure behavior branches.
/// A few demos ship two good variants, hence `BadV2` for the second bad
/// rendition they contrast against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The deliberately hostile rendition.
    Bad,
    /// The corrected rendition.
    Good,
    /// A second hostile rendition, where a demo contrasts two failure modes.
    BadV2,
}

impl Mode {
    /// Stable lowercase label used in logs and CLI output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bad => "bad",
            Self::Good => "good",
            Self::BadV2 => "bad_v2",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = FrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bad" => Ok(Self::Bad),
            "good" => Ok(Self::Good),
            "bad_v2" | "bad-v2" => Ok(Self::BadV2),
            other => Err(FrlError::InvalidPredicate {
                details: format!("unknown mode '{other}' (expected bad, good, or bad_v2)"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for mode in [Mode::Bad, Mode::Good, Mode::BadV2] {
            let parsed: Mode = mode.label().parse().unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!("mediocre".parse::<Mode>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Mode::BadV2).unwrap();
        assert_eq!(json, "\"bad_v2\"");
    }
}
