//! Hemi-octahedral mapping between `(-1, 1)²` and the upper unit hemisphere.
//!
//! The square is rotated 45° onto the L1 unit diamond, the implicit `z` of
//! the octahedron face is rebuilt, and the result is projected onto the L2
//! sphere (Cigolle et al. 2014, "A Survey of Efficient Representations for
//! Independent Unit Vectors").
//!
//! Precondition: `u` and `v` lie strictly inside `(-1, 1)`. The analysis
//! grid guarantees this through its inset epsilon.

use crate::grid::ParameterGrid;
use crate::result::{HemiOctError, HemiOctResult};
use crate::vector::{Vec3, VectorField};
use ndarray::Zip;
use std::ops::Range;

/// Norms below this are returned unnormalized instead of divided
pub const NORM_EPSILON: f64 = 1e-12;

#[inline]
fn decode_raw(u: f64, v: f64) -> Vec3 {
    let tx = (u + v) * 0.5;
    let ty = (u - v) * 0.5;
    let z = 1.0 - tx.abs() - ty.abs();
    let length = (tx * tx + ty * ty + z * z).sqrt();
    if length < NORM_EPSILON {
        return [tx, ty, z];
    }
    [tx / length, ty / length, z / length]
}

/// Decode one `(u, v)` pair to a unit vector with `z ≥ 0`
#[must_use]
pub fn decode(u: f64, v: f64) -> Vec3 {
    decode_raw(u, v)
}

/// [`decode`] with the domain precondition checked
pub fn decode_checked(u: f64, v: f64) -> HemiOctResult<Vec3> {
    let inside = |t: f64| t > -1.0 && t < 1.0;
    if !(inside(u) && inside(v)) {
        return Err(HemiOctError::OutOfDomain { u, v });
    }
    Ok(decode_raw(u, v))
}

/// Encode an upper-hemisphere direction to `(u, v)`
///
/// The input need not be normalized. Directions with `z < 0` fold onto
/// the hemisphere edge; the mapping only covers `z ≥ 0`.
#[must_use]
pub fn encode(n: Vec3) -> [f64; 2] {
    let l1 = n[0].abs() + n[1].abs() + n[2].abs();
    if l1 < NORM_EPSILON {
        return [0.0, 0.0];
    }
    let px = n[0] / l1;
    let py = n[1] / l1;
    [px + py, px - py]
}

/// Decode every cell of the grid
#[must_use]
pub fn decode_grid(grid: &ParameterGrid) -> VectorField {
    decode_rows(grid, 0..grid.resolution())
}

/// Decode a contiguous range of grid rows
#[must_use]
pub fn decode_rows(grid: &ParameterGrid, rows: Range<usize>) -> VectorField {
    let (u, v) = grid.mesh_rows(rows);
    let (r, c) = u.dim();
    let mut field = VectorField::zeros(r, c);
    Zip::from(&mut field.x)
        .and(&mut field.y)
        .and(&mut field.z)
        .and(&u)
        .and(&v)
        .for_each(|x, y, z, &u, &v| {
            [*x, *y, *z] = decode_raw(u, v);
        });
    field
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::vector::norm;

    #[test]
    fn test_center_is_pole() {
        assert_eq!(decode(0.0, 0.0), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unit_norm_on_grid() {
        let grid = ParameterGrid::new(&AnalysisConfig::new().with_resolution(33)).unwrap();
        let field = decode_grid(&grid);
        for i in 0..33 {
            for j in 0..33 {
                assert!((norm(field.at(i, j)) - 1.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_swap_negates_y() {
        let pairs = [(0.3, -0.7), (0.9, 0.1), (-0.25, -0.5)];
        for (u, v) in pairs {
            let a = decode(u, v);
            let b = decode(v, u);
            assert!((a[0] - b[0]).abs() < 1e-12);
            assert!((a[1] + b[1]).abs() < 1e-12);
            assert!((a[2] - b[2]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_corners_reach_horizon() {
        // u = ±1 or v = ±1 edges land on z = 0
        let n = decode(0.9999, 0.9999);
        assert!(n[2] < 1e-3);
        assert!(n[2] >= 0.0);
    }

    #[test]
    fn test_decode_checked_domain() {
        assert!(decode_checked(0.5, -0.5).is_ok());
        for (u, v) in [(1.0, 0.0), (0.0, -1.0), (2.0, 0.0), (f64::NAN, 0.0)] {
            assert!(matches!(
                decode_checked(u, v),
                Err(HemiOctError::OutOfDomain { .. })
            ));
        }
    }

    #[test]
    fn test_encode_pole() {
        assert_eq!(encode([0.0, 0.0, 1.0]), [0.0, 0.0]);
        assert_eq!(encode([0.0, 0.0, 0.0]), [0.0, 0.0]);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let normals = [[0.6, 0.0, 0.8], [-0.48, 0.6, 0.64], [0.0, -1.0, 0.0]];
        for n in normals {
            let [u, v] = encode(n);
            let d = decode(u, v);
            for k in 0..3 {
                assert!((d[k] - n[k]).abs() < 1e-12, "{n:?} -> {d:?}");
            }
        }
    }

    #[test]
    fn test_decode_rows_matches_full_decode() {
        let grid = ParameterGrid::new(&AnalysisConfig::new().with_resolution(9)).unwrap();
        let full = decode_grid(&grid);
        let block = decode_rows(&grid, 3..7);
        assert_eq!(block, full.rows(3..7));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_decode_is_unit_length(u in -0.9999f64..0.9999, v in -0.9999f64..0.9999) {
                let n = decode(u, v);
                prop_assert!((norm(n) - 1.0).abs() < 1e-6);
                prop_assert!(n[2] >= 0.0);
            }

            #[test]
            fn prop_encode_inverts_decode(u in -0.999f64..0.999, v in -0.999f64..0.999) {
                let [eu, ev] = encode(decode(u, v));
                prop_assert!((eu - u).abs() < 1e-9);
                prop_assert!((ev - v).abs() < 1e-9);
            }
        }
    }
}
