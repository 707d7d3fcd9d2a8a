//! Per-cell distortion and anisotropy metrics and their summaries.

use crate::config::AnisotropyModel;
use crate::derivative::TangentField;
use crate::vector::{cross, dot, norm, Vec3};
use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

/// Added to the denominator of the stretch ratio
pub const SIGMA_EPSILON: f64 = 1e-8;

/// Local area scale factor `|Tu × Tv|`
#[inline]
#[must_use]
pub fn area_distortion(tu: Vec3, tv: Vec3) -> f64 {
    norm(cross(tu, tv))
}

/// Per-axis anisotropy of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anisotropy {
    /// Stretch along u (or the larger singular value)
    pub sigma_u: f64,
    /// Stretch along v (or the smaller singular value)
    pub sigma_v: f64,
    /// `sigma_u / (sigma_v + SIGMA_EPSILON)`
    pub ratio: f64,
    /// `max(ratio, 1 / ratio)`, always ≥ 1
    pub severity: f64,
}

impl Anisotropy {
    fn from_sigmas(sigma_u: f64, sigma_v: f64) -> Self {
        let ratio = sigma_u / (sigma_v + SIGMA_EPSILON);
        Self {
            sigma_u,
            sigma_v,
            ratio,
            severity: ratio.max(1.0 / ratio),
        }
    }
}

/// Anisotropy from the tangent lengths
///
/// Equals the singular-value ratio only when `Tu ⟂ Tv`; sheared cells are
/// under-reported.
#[inline]
#[must_use]
pub fn anisotropy(tu: Vec3, tv: Vec3) -> Anisotropy {
    Anisotropy::from_sigmas(norm(tu), norm(tv))
}

/// Singular values `(σ_max, σ_min)` of the 3×2 Jacobian `[Tu Tv]`
#[must_use]
pub fn singular_values(tu: Vec3, tv: Vec3) -> (f64, f64) {
    // Eigenvalues of the Gram matrix [[a, b], [b, c]]
    let a = dot(tu, tu);
    let b = dot(tu, tv);
    let c = dot(tv, tv);
    let mean = 0.5 * (a + c);
    let spread = (0.25 * (a - c) * (a - c) + b * b).sqrt();
    let hi = mean + spread;
    let lo = (mean - spread).max(0.0);
    (hi.sqrt(), lo.sqrt())
}

/// Anisotropy from the exact singular values
#[must_use]
pub fn anisotropy_exact(tu: Vec3, tv: Vec3) -> Anisotropy {
    let (hi, lo) = singular_values(tu, tv);
    Anisotropy::from_sigmas(hi, lo)
}

/// Per-cell metric grids
#[derive(Debug, Clone, PartialEq)]
pub struct MetricField {
    /// `|Tu × Tv|`
    pub distortion: Array2<f64>,
    /// Stretch along u
    pub sigma_u: Array2<f64>,
    /// Stretch along v
    pub sigma_v: Array2<f64>,
    /// `σu / σv`, with `Tu` the column (u) derivative. Differentiating
    /// rows first gives the reciprocal; severity is unaffected.
    pub ratio: Array2<f64>,
    /// Direction-agnostic anisotropy
    pub severity: Array2<f64>,
}

impl MetricField {
    /// Zero-filled metric grids
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            distortion: Array2::zeros((rows, cols)),
            sigma_u: Array2::zeros((rows, cols)),
            sigma_v: Array2::zeros((rows, cols)),
            ratio: Array2::zeros((rows, cols)),
            severity: Array2::zeros((rows, cols)),
        }
    }

    /// Evaluate every metric from a tangent field
    #[must_use]
    pub fn from_tangents(tangents: &TangentField, model: AnisotropyModel) -> Self {
        let (rows, cols) = tangents.dim();
        let mut field = Self::zeros(rows, cols);
        let estimate: fn(Vec3, Vec3) -> Anisotropy = match model {
            AnisotropyModel::AxisNorm => anisotropy,
            AnisotropyModel::Singular => anisotropy_exact,
        };

        Zip::indexed(&mut field.distortion)
            .and(&mut field.sigma_u)
            .and(&mut field.sigma_v)
            .and(&mut field.ratio)
            .and(&mut field.severity)
            .for_each(|(i, j), distortion, sigma_u, sigma_v, ratio, severity| {
                let (tu, tv) = tangents.at(i, j);
                let a = estimate(tu, tv);
                *distortion = area_distortion(tu, tv);
                *sigma_u = a.sigma_u;
                *sigma_v = a.sigma_v;
                *ratio = a.ratio;
                *severity = a.severity;
            });

        field
    }
}

/// Area distortion summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistortionStats {
    /// Smallest area scale
    pub min: f64,
    /// Largest area scale
    pub max: f64,
    /// `max / min`; 1.0 is perfectly area-uniform
    pub ratio: f64,
}

impl DistortionStats {
    /// Summarize a distortion grid
    #[must_use]
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
                (lo.min(d), hi.max(d))
            });
        Self {
            min,
            max,
            ratio: max / min,
        }
    }
}

/// Anisotropy summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnisotropyStats {
    /// Largest severity
    pub max_severity: f64,
    /// Mean severity
    pub mean_severity: f64,
    /// Percentage of cells with severity strictly above `threshold`
    pub percent_above_threshold: f64,
    /// Threshold used for the percentage
    pub threshold: f64,
}

impl AnisotropyStats {
    /// Summarize a severity grid
    #[must_use]
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a f64>, threshold: f64) -> Self {
        let mut count = 0usize;
        let mut above = 0usize;
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        for &s in values {
            count += 1;
            sum += s;
            max = max.max(s);
            if s > threshold {
                above += 1;
            }
        }

        if count == 0 {
            return Self {
                max_severity: f64::NAN,
                mean_severity: f64::NAN,
                percent_above_threshold: 0.0,
                threshold,
            };
        }

        Self {
            max_severity: max,
            mean_severity: sum / count as f64,
            percent_above_threshold: above as f64 * 100.0 / count as f64,
            threshold,
        }
    }
}

/// Percentage of values strictly above `threshold`
#[must_use]
pub fn percent_above<'a>(values: impl IntoIterator<Item = &'a f64>, threshold: f64) -> f64 {
    AnisotropyStats::from_values(values, threshold).percent_above_threshold
}
