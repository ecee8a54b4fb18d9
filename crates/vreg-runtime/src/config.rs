#![forbid(unsafe_code)]

//! Session configuration.
//!
//! Every tunable of the editing session as a single [`SessionConfig`] that
//! can be loaded from TOML at startup.
//!
//! ```toml
//! # vreg.toml
//! history_depth = 50
//! traversal_limit = 1000
//! template_step = 160.0
//! palette_size = 6
//! max_scan_bytes = 8388608
//! ```
//!
//! Missing keys take their defaults, so `SessionConfig::default()` and an
//! empty file behave the same.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vreg_core::linearize::{DEFAULT_TRAVERSAL_LIMIT, MIN_TRAVERSAL_LIMIT};
use vreg_core::template::DEFAULT_TEMPLATE_STEP;

use crate::undo::DEFAULT_MAX_DEPTH;

/// Default number of colours the debug view cycles through for groups.
pub const DEFAULT_PALETTE_SIZE: usize = 6;
/// Default size above which scanned files are skipped.
pub const DEFAULT_MAX_SCAN_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Tunables of an [`EditorSession`](crate::EditorSession).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Undo stack bound.
    pub history_depth: usize,
    /// Linearizer hop bound (clamped to at least 100).
    pub traversal_limit: usize,
    /// Horizontal distance between template nodes.
    pub template_step: f32,
    /// Number of debug highlight colours.
    pub palette_size: usize,
    /// Files larger than this are skipped by scans.
    pub max_scan_bytes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_MAX_DEPTH,
            traversal_limit: DEFAULT_TRAVERSAL_LIMIT,
            template_step: DEFAULT_TEMPLATE_STEP,
            palette_size: DEFAULT_PALETTE_SIZE,
            max_scan_bytes: DEFAULT_MAX_SCAN_BYTES,
        }
    }
}

impl SessionConfig {
    /// Load from a TOML string and validate.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.history_depth == 0 {
            errors.push("history_depth must be at least 1".to_owned());
        }
        if self.traversal_limit < MIN_TRAVERSAL_LIMIT {
            errors.push(format!(
                "traversal_limit must be at least {MIN_TRAVERSAL_LIMIT}, got {}",
                self.traversal_limit
            ));
        }
        if !self.template_step.is_finite() || self.template_step <= 0.0 {
            errors.push(format!(
                "template_step must be a positive number, got {}",
                self.template_step
            ));
        }
        if self.palette_size == 0 {
            errors.push("palette_size must be at least 1".to_owned());
        }
        errors
    }
}
