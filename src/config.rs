//! # Engine configuration
//!
//! Limits for tick generation and the default tick algorithm. Everything has
//! a default, so a TOML file only needs to name what it changes:
//!
//! ```toml
//! [limits]
//! max_tick_marks = 50000
//!
//! [algorithm]
//! kind = "legacy"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ticks::TickAlgorithm;

/// Hard ceiling on tick candidates enumerated for one scale.
pub const MAX_TICK_MARKS: usize = 100_000;

/// Sanity ceiling on `|end - begin|` for any scale.
pub const MAX_DOMAIN_SPAN: f64 = 1_000_000.0;

/// Ceiling on `|end - begin|` for scales whose function spans several cycles.
pub const MAX_MULTI_CYCLE_SPAN: f64 = 1_000.0;

/// Bounds applied when validating definitions and enumerating ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationLimits {
    /// Tick candidate budget per scale. Values above [`MAX_TICK_MARKS`] are
    /// treated as [`MAX_TICK_MARKS`].
    pub max_tick_marks: usize,
    /// Largest accepted domain span. Values above [`MAX_DOMAIN_SPAN`] are
    /// treated as [`MAX_DOMAIN_SPAN`].
    pub max_domain_span: f64,
    /// Largest accepted domain span for multi-cycle functions, capped at
    /// [`MAX_MULTI_CYCLE_SPAN`].
    pub max_multi_cycle_span: f64,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_tick_marks: MAX_TICK_MARKS,
            max_domain_span: MAX_DOMAIN_SPAN,
            max_multi_cycle_span: MAX_MULTI_CYCLE_SPAN,
        }
    }
}

impl GenerationLimits {
    /// Effective candidate budget; never above the hard cap.
    pub fn tick_cap(&self) -> usize {
        self.max_tick_marks.min(MAX_TICK_MARKS)
    }

    /// Effective domain span ceiling; never above [`MAX_DOMAIN_SPAN`].
    pub fn domain_span_cap(&self) -> f64 {
        self.max_domain_span.min(MAX_DOMAIN_SPAN)
    }

    /// Effective multi-cycle span ceiling; never above
    /// [`MAX_MULTI_CYCLE_SPAN`].
    pub fn multi_cycle_span_cap(&self) -> f64 {
        self.max_multi_cycle_span.min(MAX_MULTI_CYCLE_SPAN)
    }
}

/// Engine configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Validation and enumeration limits.
    pub limits: GenerationLimits,
    /// Algorithm used when none is given explicitly.
    pub algorithm: TickAlgorithm,
}

impl EngineConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        tracing::debug!(
            "Loaded engine config: cap {} ticks, algorithm {:?}",
            config.limits.tick_cap(),
            config.algorithm
        );
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
