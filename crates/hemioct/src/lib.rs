//! hemioct: distortion analysis of the hemi-octahedral normal mapping
//!
//! The hemi-octahedral mapping stores an upper-hemisphere unit vector in two
//! coordinates `(u, v) ∈ (-1, 1)²`. This crate samples that square on a
//! regular grid, decodes every sample, estimates the surface tangents with
//! finite differences, and reports how the mapping stretches area and shape.
//!
//! # Pipeline
//!
//! ```text
//! AnalysisConfig ──► ParameterGrid ──► decode ──► tangents ──► metrics ──► DistortionReport
//!                    (inset square)    (unit      (Tu, Tv)     (|Tu×Tv|,   (stats + fields)
//!                                       vectors)               severity)
//! ```
//!
//! # Example
//!
//! ```
//! use hemioct::{analyze, AnalysisConfig};
//!
//! let report = analyze(&AnalysisConfig::new().with_resolution(16)).unwrap();
//! assert!(report.distortion_stats.ratio >= 1.0);
//! assert!(report.anisotropy.max_severity >= 1.0);
//! ```

#![warn(missing_docs)]

mod config;
mod decode;
mod derivative;
mod field;
mod grid;
mod metrics;
mod quantize;
mod result;
mod vector;

pub use config::{
    AnalysisConfig, AnisotropyModel, NormalEncoding, QuantizationConfig,
    DEFAULT_ANISOTROPY_THRESHOLD, DEFAULT_INSET_EPSILON, DEFAULT_RESOLUTION,
};
pub use decode::{decode, decode_checked, decode_grid, decode_rows, encode, NORM_EPSILON};
pub use derivative::{estimate_tangents, estimate_tangents_windowed, gradient, halo, TangentField};
pub use field::{
    analyze, BlockProgress, DistortionField, DistortionReport, FieldExport, Intermediates,
    ReportSummary,
};
pub use grid::{linspace, ParameterGrid, DOMAIN_WIDTH};
pub use metrics::{
    anisotropy, anisotropy_exact, area_distortion, percent_above, singular_values, Anisotropy,
    AnisotropyStats, DistortionStats, MetricField, SIGMA_EPSILON,
};
pub use quantize::{
    angular_error_deg, hemisphere_samples, quantization_study, quantize_snorm, roundtrip,
    QuantizationStats,
};
pub use result::{HemiOctError, HemiOctResult};
pub use vector::{cross, dot, norm, Vec3, VectorField};
