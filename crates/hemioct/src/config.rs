//! Analysis configuration.
//!
//! Both configurations deserialize from JSON or YAML with missing keys
//! filled from [`Default`], and must pass [`AnalysisConfig::validate`] /
//! [`QuantizationConfig::validate`] before any grid is built.

use crate::result::{HemiOctError, HemiOctResult};
use serde::{Deserialize, Serialize};

/// Default samples per grid axis
pub const DEFAULT_RESOLUTION: usize = 1024;

/// Default inward inset from the domain boundary
pub const DEFAULT_INSET_EPSILON: f64 = 1e-4;

/// Default severity above which a cell counts as visibly elongated
pub const DEFAULT_ANISOTROPY_THRESHOLD: f64 = 1.5;

/// How per-cell anisotropy is estimated from the tangent vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnisotropyModel {
    /// `|Tu| / |Tv|`. Approximates the singular values only while `Tu ⟂ Tv`.
    #[default]
    AxisNorm,
    /// Exact singular values of the 3×2 Jacobian.
    Singular,
}

impl AnisotropyModel {
    /// Short label for reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AxisNorm => "axis-norm proxy",
            Self::Singular => "exact singular values",
        }
    }
}

/// Configuration for a distortion analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Grid samples per axis
    pub resolution: usize,
    /// Inset applied to both ends of `(-1, 1)`
    pub inset_epsilon: f64,
    /// Severity threshold for the "visibly elongated" fraction
    pub anisotropy_threshold: f64,
    /// Anisotropy estimator
    pub anisotropy_model: AnisotropyModel,
    /// Rows processed per block; `None` processes the grid in one pass
    pub block_rows: Option<usize>,
    /// Keep the decoded vectors and per-axis stretches in the report
    pub keep_intermediates: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            inset_epsilon: DEFAULT_INSET_EPSILON,
            anisotropy_threshold: DEFAULT_ANISOTROPY_THRESHOLD,
            anisotropy_model: AnisotropyModel::AxisNorm,
            block_rows: None,
            keep_intermediates: false,
        }
    }
}

impl AnalysisConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid resolution
    #[must_use]
    pub const fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the domain inset
    #[must_use]
    pub const fn with_inset_epsilon(mut self, epsilon: f64) -> Self {
        self.inset_epsilon = epsilon;
        self
    }

    /// Set the anisotropy threshold
    #[must_use]
    pub const fn with_anisotropy_threshold(mut self, threshold: f64) -> Self {
        self.anisotropy_threshold = threshold;
        self
    }

    /// Set the anisotropy estimator
    #[must_use]
    pub const fn with_anisotropy_model(mut self, model: AnisotropyModel) -> Self {
        self.anisotropy_model = model;
        self
    }

    /// Process the grid in blocks of `rows` rows
    #[must_use]
    pub const fn with_block_rows(mut self, rows: usize) -> Self {
        self.block_rows = Some(rows);
        self
    }

    /// Retain full-size decoded and stretch grids
    #[must_use]
    pub const fn with_intermediates(mut self, keep: bool) -> Self {
        self.keep_intermediates = keep;
        self
    }

    /// Number of rows handled per block
    #[must_use]
    pub fn effective_block_rows(&self) -> usize {
        self.block_rows
            .map_or(self.resolution, |rows| rows.min(self.resolution))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> HemiOctResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> HemiOctResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> HemiOctResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> HemiOctResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Reject configurations that cannot produce a valid grid
    pub fn validate(&self) -> HemiOctResult<()> {
        if self.resolution < 2 {
            return Err(HemiOctError::invalid_config(
                "resolution",
                format!("must be at least 2, got {}", self.resolution),
            ));
        }

        validate_inset(self.inset_epsilon)?;

        if !self.anisotropy_threshold.is_finite() || self.anisotropy_threshold <= 0.0 {
            return Err(HemiOctError::invalid_config(
                "anisotropy_threshold",
                format!(
                    "must be finite and positive, got {}",
                    self.anisotropy_threshold
                ),
            ));
        }

        if self.block_rows == Some(0) {
            return Err(HemiOctError::invalid_config("block_rows", "must be at least 1"));
        }

        Ok(())
    }
}

fn validate_inset(epsilon: f64) -> HemiOctResult<()> {
    // ε ≥ 1 collapses or inverts the domain (-1 + ε, 1 - ε)
    if !epsilon.is_finite() || !(0.0..1.0).contains(&epsilon) {
        return Err(HemiOctError::invalid_config(
            "inset_epsilon",
            format!("must lie in [0, 1), got {epsilon}"),
        ));
    }
    Ok(())
}

/// Two-channel direction encodings compared by the quantization study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalEncoding {
    /// Hemi-octahedral `(u, v)`
    #[default]
    HemiOct,
    /// Raw `(x, y)` with `z` rebuilt as `sqrt(1 - x² - y²)`
    ProjectedXy,
}

/// Configuration for the normal quantization study
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizationConfig {
    /// Bits per stored channel
    pub bits: u32,
    /// Samples per spherical axis (polar and azimuthal)
    pub samples: usize,
    /// Encoding under test
    pub encoding: NormalEncoding,
}

impl Default for QuantizationConfig {
    fn default() -> Self {
        Self {
            bits: 8,
            samples: 256,
            encoding: NormalEncoding::HemiOct,
        }
    }
}

impl QuantizationConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bits per channel
    #[must_use]
    pub const fn with_bits(mut self, bits: u32) -> Self {
        self.bits = bits;
        self
    }

    /// Set samples per axis
    #[must_use]
    pub const fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the encoding
    #[must_use]
    pub const fn with_encoding(mut self, encoding: NormalEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Reject unusable bit depths and sample counts
    pub fn validate(&self) -> HemiOctResult<()> {
        if !(1..=16).contains(&self.bits) {
            return Err(HemiOctError::invalid_config(
                "bits",
                format!("must lie in 1..=16, got {}", self.bits),
            ));
        }
        if self.samples < 2 {
            return Err(HemiOctError::invalid_config(
                "samples",
                format!("must be at least 2, got {}", self.samples),
            ));
        }
        Ok(())
    }
}
