//! Finite-difference tangent estimation.
//!
//! Central differences in the interior, first-order one-sided differences
//! on the first and last sample of each axis. Each channel is differentiated
//! independently and the results are reassembled into vectors.

use crate::vector::{Vec3, VectorField};
use ndarray::{Array2, ArrayView2, Axis};
use std::ops::Range;

/// Derivative of sample `k` of a sequence of length `n` (`n ≥ 2`)
#[inline]
fn difference(f: impl Fn(usize) -> f64, k: usize, n: usize, step: f64) -> f64 {
    if k == 0 {
        (f(1) - f(0)) / step
    } else if k == n - 1 {
        (f(n - 1) - f(n - 2)) / step
    } else {
        (f(k + 1) - f(k - 1)) / (2.0 * step)
    }
}

/// Numerical gradient of a 2D array along one axis
#[must_use]
pub fn gradient(values: ArrayView2<'_, f64>, axis: Axis, step: f64) -> Array2<f64> {
    let (rows, cols) = values.dim();
    Array2::from_shape_fn((rows, cols), |(i, j)| match axis {
        Axis(0) => difference(|k| values[[k, j]], i, rows, step),
        _ => difference(|k| values[[i, k]], j, cols, step),
    })
}

/// Row derivative over a window of rows
///
/// `window` holds global rows `window_start..window_start + window.nrows()`
/// of a field with `total_rows` rows. Returns derivatives for the global
/// rows in `out`, which must have their neighbours inside the window.
fn gradient_rows_windowed(
    window: ArrayView2<'_, f64>,
    window_start: usize,
    total_rows: usize,
    out: Range<usize>,
    step: f64,
) -> Array2<f64> {
    let cols = window.ncols();
    Array2::from_shape_fn((out.len(), cols), |(i, j)| {
        let row = out.start + i;
        difference(|k| window[[k - window_start, j]], row, total_rows, step)
    })
}

/// Rows needed around `rows` to difference them along `v`
#[must_use]
pub fn halo(rows: &Range<usize>, total_rows: usize) -> Range<usize> {
    rows.start.saturating_sub(1)..(rows.end + 1).min(total_rows)
}

/// Partial derivatives of a decoded field
#[derive(Debug, Clone, PartialEq)]
pub struct TangentField {
    /// ∂P/∂u, along columns
    pub tu: VectorField,
    /// ∂P/∂v, along rows
    pub tv: VectorField,
}

impl TangentField {
    /// `(rows, cols)`
    #[must_use]
    pub fn dim(&self) -> (usize, usize) {
        self.tu.dim()
    }

    /// `(Tu, Tv)` at one cell
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> (Vec3, Vec3) {
        (self.tu.at(row, col), self.tv.at(row, col))
    }
}

/// Estimate tangents over the whole decoded field
#[must_use]
pub fn estimate_tangents(decoded: &VectorField, step: f64) -> TangentField {
    let rows = decoded.dim().0;
    estimate_tangents_windowed(decoded, 0, rows, 0..rows, step)
}

/// Estimate tangents for a block of rows
///
/// `window` is the decoded data for global rows starting at `window_start`
/// and must cover [`halo`]`(out)`. Results are identical to slicing the
/// output of [`estimate_tangents`] on the full field.
#[must_use]
pub fn estimate_tangents_windowed(
    window: &VectorField,
    window_start: usize,
    total_rows: usize,
    out: Range<usize>,
    step: f64,
) -> TangentField {
    let local = (out.start - window_start)..(out.end - window_start);
    let along_u = |channel: &Array2<f64>| {
        gradient(channel.slice(ndarray::s![local.clone(), ..]), Axis(1), step)
    };
    let along_v = |channel: &Array2<f64>| {
        gradient_rows_windowed(channel.view(), window_start, total_rows, out.clone(), step)
    };

    TangentField {
        tu: VectorField {
            x: along_u(&window.x),
            y: along_u(&window.y),
            z: along_u(&window.z),
        },
        tv: VectorField {
            x: along_v(&window.x),
            y: along_v(&window.y),
            z: along_v(&window.z),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::decode::{decode_grid, decode_rows};
    use crate::grid::ParameterGrid;
    use ndarray::array;

    #[test]
    fn test_gradient_central_and_edges() {
        let f = array![[1.0, 2.0, 4.0, 7.0, 11.0]];
        let g = gradient(f.view(), Axis(1), 1.0);
        assert_eq!(g, array![[1.0, 1.5, 2.5, 3.5, 4.0]]);
    }

    #[test]
    fn test_gradient_along_rows() {
        let f = array![[0.0, 0.0], [2.0, 4.0], [6.0, 8.0]];
        let g = gradient(f.view(), Axis(0), 2.0);
        assert_eq!(g, array![[1.0, 2.0], [1.5, 2.0], [2.0, 2.0]]);
    }

    #[test]
    fn test_gradient_two_samples() {
        let f = array![[3.0, 5.0]];
        let g = gradient(f.view(), Axis(1), 0.5);
        assert_eq!(g, array![[4.0, 4.0]]);
    }

    #[test]
    fn test_gradient_exact_for_linear() {
        let f = Array2::from_shape_fn((6, 6), |(i, j)| 3.0 * i as f64 - 2.0 * j as f64);
        let gv = gradient(f.view(), Axis(0), 1.0);
        let gu = gradient(f.view(), Axis(1), 1.0);
        assert!(gv.iter().all(|&d| (d - 3.0).abs() < 1e-12));
        assert!(gu.iter().all(|&d| (d + 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_halo_clamps_to_grid() {
        assert_eq!(halo(&(0..4), 10), 0..5);
        assert_eq!(halo(&(4..8), 10), 3..9);
        assert_eq!(halo(&(8..10), 10), 7..10);
    }

    #[test]
    fn test_windowed_matches_full() {
        let grid = ParameterGrid::new(&AnalysisConfig::new().with_resolution(11)).unwrap();
        let decoded = decode_grid(&grid);
        let full = estimate_tangents(&decoded, grid.step());

        for block in [0..3, 3..8, 8..11, 0..11] {
            let window_rows = halo(&block, 11);
            let window = decode_rows(&grid, window_rows.clone());
            let part =
                estimate_tangents_windowed(&window, window_rows.start, 11, block.clone(), grid.step());
            assert_eq!(part.tu, full.tu.rows(block.clone()));
            assert_eq!(part.tv, full.tv.rows(block));
        }
    }

    #[test]
    fn test_tangents_at_pole_are_axis_aligned() {
        let grid = ParameterGrid::new(&AnalysisConfig::new().with_resolution(101)).unwrap();
        let tangents = estimate_tangents(&decode_grid(&grid), grid.step());
        let (tu, tv) = tangents.at(50, 50);
        // Moving along u tilts x and y together, along v they split
        assert!(tu[0] > 0.0 && tu[1] > 0.0);
        assert!(tv[0] > 0.0 && tv[1] < 0.0);
    }
}
