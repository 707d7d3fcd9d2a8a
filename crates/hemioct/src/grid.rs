//! Uniform parameter grid over the inset domain `(-1 + ε, 1 - ε)²`.

use crate::config::AnalysisConfig;
use crate::result::HemiOctResult;
use ndarray::{Array2, ArrayView1};
use std::ops::Range;

/// Width of the nominal parameter domain `(-1, 1)`
pub const DOMAIN_WIDTH: f64 = 2.0;

/// Evenly spaced samples over `[start, stop]`, endpoint included
///
/// Sample `i` is `start + i * (stop - start) / (count - 1)`; the last sample
/// is pinned to `stop`.
#[must_use]
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (stop - start) / (count - 1) as f64;
            let mut samples: Vec<f64> = (0..count).map(|i| i as f64 * delta + start).collect();
            samples[count - 1] = stop;
            samples
        }
    }
}

/// Sample positions shared by both axes of the square grid
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    samples: Vec<f64>,
    inset_epsilon: f64,
}

impl ParameterGrid {
    /// Build the grid described by a configuration
    pub fn new(config: &AnalysisConfig) -> HemiOctResult<Self> {
        config.validate()?;
        let lo = -1.0 + config.inset_epsilon;
        let hi = 1.0 - config.inset_epsilon;
        Ok(Self {
            samples: linspace(lo, hi, config.resolution),
            inset_epsilon: config.inset_epsilon,
        })
    }

    /// Samples per axis
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.samples.len()
    }

    /// Number of `(u, v)` cells
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.samples.len() * self.samples.len()
    }

    /// Inset used to build the grid
    #[must_use]
    pub const fn inset_epsilon(&self) -> f64 {
        self.inset_epsilon
    }

    /// Samples along `u` (columns)
    #[must_use]
    pub fn u_axis(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(self.samples.as_slice())
    }

    /// Samples along `v` (rows)
    #[must_use]
    pub fn v_axis(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(self.samples.as_slice())
    }

    /// Finite-difference spacing over the nominal domain width
    ///
    /// This is `2 / (resolution - 1)`, not the inset sample spacing; the
    /// difference scales every derivative by `1 - ε`.
    #[must_use]
    pub fn step(&self) -> f64 {
        DOMAIN_WIDTH / (self.resolution() - 1) as f64
    }

    /// Coordinate meshes `(U, V)` with `U[i][j] = u_j`, `V[i][j] = v_i`
    #[must_use]
    pub fn mesh(&self) -> (Array2<f64>, Array2<f64>) {
        self.mesh_rows(0..self.resolution())
    }

    /// Coordinate meshes restricted to a range of rows
    #[must_use]
    pub fn mesh_rows(&self, rows: Range<usize>) -> (Array2<f64>, Array2<f64>) {
        let n = self.resolution();
        let shape = (rows.len(), n);
        let u = Array2::from_shape_fn(shape, |(_, j)| self.samples[j]);
        let v = Array2::from_shape_fn(shape, |(i, _)| self.samples[rows.start + i]);
        (u, v)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn grid(resolution: usize) -> ParameterGrid {
        ParameterGrid::new(&AnalysisConfig::new().with_resolution(resolution)).unwrap()
    }

    #[test]
    fn test_linspace_endpoints() {
        let s = linspace(-0.5, 0.5, 5);
        assert_eq!(s.len(), 5);
        assert_eq!(s[0], -0.5);
        assert_eq!(s[4], 0.5);
        assert!((s[2]).abs() < 1e-15);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.25, 1.0, 1), vec![0.25]);
    }

    #[test]
    fn test_samples_strictly_interior() {
        let g = grid(17);
        for &s in g.u_axis() {
            assert!(s > -1.0 && s < 1.0);
        }
        assert!((g.u_axis()[0] + 1.0 - 1e-4).abs() < 1e-15);
        assert!((g.u_axis()[16] - 1.0 + 1e-4).abs() < 1e-15);
    }

    #[test]
    fn test_step_uses_nominal_width() {
        let g = grid(5);
        assert!((g.step() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mesh_orientation() {
        let g = grid(4);
        let (u, v) = g.mesh();
        assert_eq!(u.dim(), (4, 4));
        assert_eq!(g.cell_count(), 16);
        // u varies along columns, v along rows
        assert_eq!(u[[0, 3]], g.u_axis()[3]);
        assert_eq!(u[[2, 3]], g.u_axis()[3]);
        assert_eq!(v[[2, 0]], g.v_axis()[2]);
        assert_eq!(v[[2, 3]], g.v_axis()[2]);
    }

    #[test]
    fn test_mesh_rows_matches_full_mesh() {
        let g = grid(6);
        let (u, v) = g.mesh();
        let (bu, bv) = g.mesh_rows(2..5);
        assert_eq!(bu.dim(), (3, 6));
        assert_eq!(bu, u.slice(ndarray::s![2..5, ..]));
        assert_eq!(bv, v.slice(ndarray::s![2..5, ..]));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = ParameterGrid::new(&AnalysisConfig::new().with_resolution(1));
        assert!(result.is_err());
    }
}
