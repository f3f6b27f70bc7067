//! Pipeline configuration.
//!
//! Loaded from a JSON file by the application and handed section by section
//! to the loader, the resolver, and the output writers.  Every field has a
//! default, so `{}` is a valid configuration: no rotation, lenient
//! resolution, zero-based output into `./output`.
//!
//! ```json
//! {
//!   "network": { "rotation_degrees": 28.9 },
//!   "resolve": { "strict_segments": false, "strict_capacity": true },
//!   "output":  { "dir": "res", "index_base": "one" }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub network: NetworkConfig,
    pub resolve: ResolveConfig,
    pub output: OutputConfig,
}

/// Network loading options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Clockwise rotation applied to every node location, in degrees.
    /// `0.0` leaves locations untouched.
    pub rotation_degrees: f64,
}

/// Route resolution strictness.
///
/// Both flags default to the lenient behavior: unmatched segments are
/// dropped and capacity may go negative.  Either way every occurrence is
/// counted in the batch report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveConfig {
    /// Fail a route that contains a node pair with no road.
    pub strict_segments: bool,
    /// Fail a route that would drive any capacity cell below zero.
    pub strict_capacity: bool,
}

/// Whether index columns are written zero- or one-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBase {
    #[default]
    Zero,
    One,
}

impl IndexBase {
    /// Translate an internal zero-based index for output.
    #[inline]
    pub fn apply(self, index: usize) -> usize {
        match self {
            IndexBase::Zero => index,
            IndexBase::One => index + 1,
        }
    }
}

/// Output writer options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub index_base: IndexBase,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("output"), index_base: IndexBase::Zero }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_path(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !self.network.rotation_degrees.is_finite() {
            return Err(CoreError::Config(format!(
                "network.rotation_degrees must be finite, got {}",
                self.network.rotation_degrees
            )));
        }
        Ok(())
    }
}
