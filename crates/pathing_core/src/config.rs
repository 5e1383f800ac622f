//! Pathfinder configuration, loadable from RON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found.
    #[error("Config file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Parsed, but the values are unusable.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// What a path request does when it produces no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FailurePolicy {
    /// Invoke the completion callback with the error.
    #[default]
    Report,
    /// Never invoke the completion callback without a path.
    SilentDrop,
}

/// Pathfinder settings.
///
/// # Example RON
///
/// ```ron
/// PathfinderConfig(
///     worker_threads: 4,
///     thread_name_prefix: "pathfinder",
///     failure_policy: SilentDrop,
///     diagnostics_by_default: false,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfinderConfig {
    /// Worker threads for searches (0 = one per CPU).
    pub worker_threads: usize,
    /// Worker threads are named `{prefix}-{index}`.
    pub thread_name_prefix: String,
    /// Whether failed requests reach their callback.
    pub failure_policy: FailurePolicy,
    /// Keep per-node diagnostics when a request does not say otherwise.
    pub diagnostics_by_default: bool,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            thread_name_prefix: "pathfinder".to_string(),
            failure_policy: FailurePolicy::Report,
            diagnostics_by_default: false,
        }
    }
}

impl PathfinderConfig {
    /// Load a configuration from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self, ConfigError> {
        let config: PathfinderConfig = ron::from_str(ron)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thread_name_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "thread_name_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the worker thread count.
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}
