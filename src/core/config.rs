//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::errors::{FrlError, Result};

/// Full frl configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub scheduler: SchedulerConfig,
    pub buckets: BucketConfig,
    pub recency: RecencyConfig,
    pub telemetry: TelemetryConfig,
    pub paths: PathsConfig,
}

/// Timer delays and intervals used by the demo sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Lower bound of the randomized interrupt-trap delay.
    pub trap_delay_min_ms: u64,
    /// Upper bound of the randomized interrupt-trap delay.
    pub trap_delay_max_ms: u64,
    /// Period of the simulated crash in the draft demo.
    pub crash_interval_secs: u64,
    /// Autosave checkpoint period (good mode of the draft demo).
    pub autosave_interval_secs: u64,
}

/// Size-bucket thresholds for `CategoricalRange` predicates.
///
/// Thresholds are configuration, never hardcoded in the evaluator:
/// `Small` is `value <= small_max`, `Medium` is `small_max < value <=
/// medium_max`, `Large` is `value > medium_max`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BucketConfig {
    pub small_max: f64,
    pub medium_max: f64,
}

/// Recency windows for `RelativeTime` predicates, in days, measured
/// against an explicit reference date (never the wall clock implicitly).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecencyConfig {
    pub week_days: i64,
    pub month_days: i64,
    /// Fixed reference date for deterministic evaluation. `None` means the
    /// caller must supply one (the CLI defaults to today's date).
    pub reference_date: Option<NaiveDate>,
}

/// Event-log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub jsonl_path: PathBuf,
}

/// Filesystem paths used by frl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            trap_delay_min_ms: 3_000,
            trap_delay_max_ms: 6_000,
            crash_interval_secs: 30,
            autosave_interval_secs: 5,
        }
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            small_max: 7.0,
            medium_max: 9.0,
        }
    }
}

impl Default for RecencyConfig {
    fn default() -> Self {
        Self {
            week_days: 7,
            month_days: 30,
            reference_date: None,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            jsonl_path: data_dir().join("activity.jsonl"),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_file: home_dir().join(".config").join("frl").join("config.toml"),
        }
    }
}

fn home_dir() -> PathBuf {
    env::var_os("HOME").map_or_else(
        || {
            eprintln!("[FRL-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths");
            PathBuf::from("/tmp")
        },
        PathBuf::from,
    )
}

fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("frl")
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path;
    /// defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| FrlError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(FrlError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        set_env_u64(
            "FRL_TRAP_DELAY_MIN_MS",
            &mut self.scheduler.trap_delay_min_ms,
        )?;
        set_env_u64(
            "FRL_TRAP_DELAY_MAX_MS",
            &mut self.scheduler.trap_delay_max_ms,
        )?;
        set_env_u64(
            "FRL_CRASH_INTERVAL_SECS",
            &mut self.scheduler.crash_interval_secs,
        )?;
        set_env_u64(
            "FRL_AUTOSAVE_INTERVAL_SECS",
            &mut self.scheduler.autosave_interval_secs,
        )?;

        set_env_f64("FRL_BUCKETS_SMALL_MAX", &mut self.buckets.small_max)?;
        set_env_f64("FRL_BUCKETS_MEDIUM_MAX", &mut self.buckets.medium_max)?;

        set_env_i64("FRL_RECENCY_WEEK_DAYS", &mut self.recency.week_days)?;
        set_env_i64("FRL_RECENCY_MONTH_DAYS", &mut self.recency.month_days)?;

        set_env_bool("FRL_TELEMETRY_ENABLED", &mut self.telemetry.enabled)?;
        if let Some(raw) = env::var_os("FRL_TELEMETRY_JSONL_PATH") {
            self.telemetry.jsonl_path = PathBuf::from(raw);
        }

        Ok(())
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.scheduler.trap_delay_min_ms > self.scheduler.trap_delay_max_ms {
            return Err(FrlError::InvalidConfig {
                details: format!(
                    "trap_delay_min_ms ({}) exceeds trap_delay_max_ms ({})",
                    self.scheduler.trap_delay_min_ms, self.scheduler.trap_delay_max_ms
                ),
            });
        }
        if self.scheduler.crash_interval_secs == 0 {
            return Err(FrlError::InvalidConfig {
                details: "crash_interval_secs must be positive".to_string(),
            });
        }
        if self.scheduler.autosave_interval_secs == 0 {
            return Err(FrlError::InvalidConfig {
                details: "autosave_interval_secs must be positive".to_string(),
            });
        }
        if self.buckets.small_max > self.buckets.medium_max {
            return Err(FrlError::InvalidConfig {
                details: format!(
                    "buckets.small_max ({}) exceeds buckets.medium_max ({})",
                    self.buckets.small_max, self.buckets.medium_max
                ),
            });
        }
        if self.recency.week_days <= 0 || self.recency.month_days <= 0 {
            return Err(FrlError::InvalidConfig {
                details: "recency windows must be positive day counts".to_string(),
            });
        }
        if self.recency.week_days > self.recency.month_days {
            return Err(FrlError::InvalidConfig {
                details: format!(
                    "recency.week_days ({}) exceeds recency.month_days ({})",
                    self.recency.week_days, self.recency.month_days
                ),
            });
        }
        Ok(())
    }
}

// ──────────────────── env helpers ────────────────────

fn env_raw(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn set_env_u64(key: &str, target: &mut u64) -> Result<()> {
    if let Some(raw) = env_raw(key) {
        *target = raw.parse().map_err(|_| FrlError::InvalidConfig {
            details: format!("{key} must be an unsigned integer, got '{raw}'"),
        })?;
    }
    Ok(())
}

fn set_env_i64(key: &str, target: &mut i64) -> Result<()> {
    if let Some(raw) = env_raw(key) {
        *target = raw.parse().map_err(|_| FrlError::InvalidConfig {
            details: format!("{key} must be an integer, got '{raw}'"),
        })?;
    }
    Ok(())
}

fn set_env_f64(key: &str, target: &mut f64) -> Result<()> {
    if let Some(raw) = env_raw(key) {
        *target = raw.parse().map_err(|_| FrlError::InvalidConfig {
            details: format!("{key} must be a number, got '{raw}'"),
        })?;
    }
    Ok(())
}

fn set_env_bool(key: &str, target: &mut bool) -> Result<()> {
    if let Some(raw) = env_raw(key) {
        *target = match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                return Err(FrlError::InvalidConfig {
                    details: format!("{key} must be a boolean, got '{raw}'"),
                });
            }
        };
    }
    Ok(())
}
