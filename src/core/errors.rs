//! FRL-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, FrlError>;

/// Top-level error type for Friction Lab.
///
/// The two core mechanisms never raise: a rejected re-arm is a silent
/// no-op and a malformed field degrades to a non-match. Errors surface
/// only at the edges — configuration, catalog lookup, CLI predicate
/// parsing, and IO.
#[derive(Debug, Error)]
pub enum FrlError {
    #[error("[FRL-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[FRL-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[FRL-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[FRL-2001] unknown demo: {slug}")]
    UnknownDemo { slug: String },

    #[error("[FRL-2002] unknown record field: {field}")]
    UnknownField { field: String },

    #[error("[FRL-2003] invalid filter predicate: {details}")]
    InvalidPredicate { details: String },

    #[error("[FRL-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[FRL-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[FRL-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl FrlError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "FRL-1001",
            Self::MissingConfig { .. } => "FRL-1002",
            Self::ConfigParse { .. } => "FRL-1003",
            Self::UnknownDemo { .. } => "FRL-2001",
            Self::UnknownField { .. } => "FRL-2002",
            Self::InvalidPredicate { .. } => "FRL-2003",
            Self::Serialization { .. } => "FRL-2101",
            Self::Io { .. } => "FRL-3002",
            Self::Runtime { .. } => "FRL-3900",
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for FrlError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for FrlError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_errors() -> Vec<FrlError> {
        vec![
            FrlError::InvalidConfig {
                details: String::new(),
            },
            FrlError::MissingConfig {
                path: PathBuf::new(),
            },
            FrlError::ConfigParse {
                context: "",
                details: String::new(),
            },
            FrlError::UnknownDemo {
                slug: String::new(),
            },
            FrlError::UnknownField {
                field: String::new(),
            },
            FrlError::InvalidPredicate {
                details: String::new(),
            },
            FrlError::Serialization {
                context: "",
                details: String::new(),
            },
            FrlError::Io {
                path: PathBuf::new(),
                source: std::io::Error::other("test"),
            },
            FrlError::Runtime {
                details: String::new(),
            },
        ]
    }

    #[test]
    fn error_codes_are_unique() {
        let errors = sample_errors();
        let codes: Vec<&str> = errors.iter().map(FrlError::code).collect();
        let unique: std::collections::HashSet<&&str> = codes.iter().collect();
        assert_eq!(
            codes.len(),
            unique.len(),
            "error codes must be unique: {codes:?}"
        );
    }

    #[test]
    fn error_codes_have_frl_prefix() {
        for err in &sample_errors() {
            assert!(
                err.code().starts_with("FRL-"),
                "code {} must start with FRL-",
                err.code()
            );
        }
    }

    #[test]
    fn error_display_includes_code() {
        let err = FrlError::UnknownDemo {
            slug: "not-a-demo".to_string(),
        };
        let msg = err.to_string();
        assert!(
            msg.contains("FRL-2001"),
            "display should contain error code: {msg}"
        );
        assert!(
            msg.contains("not-a-demo"),
            "display should contain slug: {msg}"
        );
    }

    #[test]
    fn io_convenience_constructor() {
        let err = FrlError::io(
            "/tmp/test.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.code(), "FRL-3002");
        assert!(err.to_string().contains("/tmp/test.toml"));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: FrlError = json_err.into();
        assert_eq!(err.code(), "FRL-2101");
    }

    #[test]
    fn from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= invalid").unwrap_err();
        let err: FrlError = toml_err.into();
        assert_eq!(err.code(), "FRL-1003");
    }
}
