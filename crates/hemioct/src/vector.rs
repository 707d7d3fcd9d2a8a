//! 3-vector helpers and grids of 3-vectors stored channel by channel.

use crate::result::{HemiOctError, HemiOctResult};
use ndarray::{s, Array2};
use std::ops::Range;

/// A 3D vector
pub type Vec3 = [f64; 3];

/// Dot product
#[inline]
#[must_use]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product
#[inline]
#[must_use]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean norm
#[inline]
#[must_use]
pub fn norm(a: Vec3) -> f64 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}

/// A `rows × cols` grid of 3-vectors, one array per component
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    /// x components
    pub x: Array2<f64>,
    /// y components
    pub y: Array2<f64>,
    /// z components
    pub z: Array2<f64>,
}

impl VectorField {
    /// Zero-filled field
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            x: Array2::zeros((rows, cols)),
            y: Array2::zeros((rows, cols)),
            z: Array2::zeros((rows, cols)),
        }
    }

    /// Assemble a field from per-channel arrays of equal shape
    pub fn from_channels(x: Array2<f64>, y: Array2<f64>, z: Array2<f64>) -> HemiOctResult<Self> {
        for channel in [&y, &z] {
            if channel.dim() != x.dim() {
                return Err(HemiOctError::ShapeMismatch {
                    expected: x.dim(),
                    actual: channel.dim(),
                });
            }
        }
        Ok(Self { x, y, z })
    }

    /// `(rows, cols)`
    #[must_use]
    pub fn dim(&self) -> (usize, usize) {
        self.x.dim()
    }

    /// Vector at one cell
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> Vec3 {
        [self.x[[row, col]], self.y[[row, col]], self.z[[row, col]]]
    }

    /// Copy of a contiguous range of rows
    #[must_use]
    pub fn rows(&self, rows: Range<usize>) -> Self {
        Self {
            x: self.x.slice(s![rows.clone(), ..]).to_owned(),
            y: self.y.slice(s![rows.clone(), ..]).to_owned(),
            z: self.z.slice(s![rows, ..]).to_owned(),
        }
    }

    /// Overwrite rows starting at `row` with the contents of `block`
    pub fn write_rows(&mut self, row: usize, block: &Self) {
        let end = row + block.dim().0;
        self.x.slice_mut(s![row..end, ..]).assign(&block.x);
        self.y.slice_mut(s![row..end, ..]).assign(&block.y);
        self.z.slice_mut(s![row..end, ..]).assign(&block.z);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_of_basis() {
        assert_eq!(cross([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_eq!(cross([0.0, 1.0, 0.0], [1.0, 0.0, 0.0]), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_dot_and_norm() {
        assert_eq!(dot([1.0, 2.0, 3.0], [4.0, -5.0, 6.0]), 12.0);
        assert_eq!(norm([3.0, 4.0, 0.0]), 5.0);
    }

    #[test]
    fn test_from_channels_shape_mismatch() {
        let err = VectorField::from_channels(
            Array2::zeros((2, 2)),
            Array2::zeros((2, 3)),
            Array2::zeros((2, 2)),
        )
        .unwrap_err();
        assert!(matches!(err, HemiOctError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_rows_and_write_rows() {
        let x = Array2::from_shape_fn((4, 2), |(i, j)| (i * 10 + j) as f64);
        let field = VectorField::from_channels(x.clone(), x.clone(), x).unwrap();
        let block = field.rows(1..3);
        assert_eq!(block.dim(), (2, 2));
        assert_eq!(block.at(0, 1), [11.0, 11.0, 11.0]);

        let mut target = VectorField::zeros(4, 2);
        target.write_rows(1, &block);
        assert_eq!(target.at(2, 0), [20.0, 20.0, 20.0]);
        assert_eq!(target.at(0, 0), [0.0, 0.0, 0.0]);
    }
}
