//! Restoration run parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kernel::DEFAULT_ALPHA;

/// Reference number of sweep passes.
pub const DEFAULT_PASSES: usize = 101;

/// Which regions of interest are accepted at the image border.
///
/// Neighbor reads are bounds-checked under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderPolicy {
    /// The region must leave a one-pixel margin on every side, so every
    /// processed pixel has all 8 neighbors in frame.
    #[default]
    RequireMargin,
    /// The region may touch the image edge. Neighbors outside the frame are
    /// absent and contribute nothing.
    SkipAbsent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreConfig {
    /// Number of sweeps over the region. Always run in full.
    pub passes: usize,
    /// Gradient threshold of the weight kernel.
    pub alpha: f64,
    pub border: BorderPolicy,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            passes: DEFAULT_PASSES,
            alpha: DEFAULT_ALPHA,
            border: BorderPolicy::default(),
        }
    }
}

impl RestoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.passes == 0 {
            return Err(Error::InvalidConfig("passes must be at least 1".into()));
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "alpha must be positive and finite, got {}",
                self.alpha
            )));
        }
        Ok(())
    }

    /// Loads a YAML or JSON config. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, common::ConfigFormatError> {
        common::load_config(path)
    }
}
