//! Angular error of two-channel normal encodings at a fixed bit depth.
//!
//! Normals are sampled on a regular polar/azimuthal grid over the upper
//! hemisphere, encoded, stored as unsigned-normalized integers with
//! truncating quantization (`floor(x * max) / max`), decoded, and compared
//! with the original direction.

use crate::config::{NormalEncoding, QuantizationConfig};
use crate::decode::{decode, encode};
use crate::result::HemiOctResult;
use crate::vector::{dot, norm, Vec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use tracing::info;

/// Quantize a value in `[-1, 1]` to `bits` and back
#[must_use]
pub fn quantize_snorm(value: f64, bits: u32) -> f64 {
    let max = f64::from((1u32 << bits) - 1);
    let unorm = (value * 0.5 + 0.5).clamp(0.0, 1.0);
    let q = (unorm * max).floor() / max;
    q * 2.0 - 1.0
}

/// Encode, quantize and decode one unit normal
#[must_use]
pub fn roundtrip(n: Vec3, encoding: NormalEncoding, bits: u32) -> Vec3 {
    match encoding {
        NormalEncoding::HemiOct => {
            let [u, v] = encode(n);
            decode(quantize_snorm(u, bits), quantize_snorm(v, bits))
        }
        NormalEncoding::ProjectedXy => {
            let x = quantize_snorm(n[0], bits);
            let y = quantize_snorm(n[1], bits);
            let z = (1.0 - x * x - y * y).max(0.0).sqrt();
            let length = norm([x, y, z]);
            [x / length, y / length, z / length]
        }
    }
}

/// Angle between two unit vectors in degrees
#[must_use]
pub fn angular_error_deg(a: Vec3, b: Vec3) -> f64 {
    dot(a, b).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Sample directions covering the upper hemisphere
#[must_use]
pub fn hemisphere_samples(samples: usize) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(samples * samples);
    for i in 0..samples {
        let theta = (i as f64 + 0.5) / samples as f64 * FRAC_PI_2;
        let (sin_t, cos_t) = theta.sin_cos();
        for j in 0..samples {
            let phi = (j as f64 + 0.5) / samples as f64 * TAU;
            let (sin_p, cos_p) = phi.sin_cos();
            out.push([sin_t * cos_p, sin_t * sin_p, cos_t]);
        }
    }
    out
}

/// Angular error summary for one encoding and bit depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizationStats {
    /// Encoding measured
    pub encoding: NormalEncoding,
    /// Bits per channel
    pub bits: u32,
    /// Directions sampled
    pub samples: usize,
    /// Largest angular error
    pub max_angular_error_deg: f64,
    /// Mean angular error
    pub mean_angular_error_deg: f64,
    /// Root-mean-square angular error
    pub rms_angular_error_deg: f64,
}

/// Run the quantization study
pub fn quantization_study(config: &QuantizationConfig) -> HemiOctResult<QuantizationStats> {
    config.validate()?;

    let normals = hemisphere_samples(config.samples);
    let mut max = 0.0f64;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for &n in &normals {
        let error = angular_error_deg(n, roundtrip(n, config.encoding, config.bits));
        max = max.max(error);
        sum += error;
        sum_sq += error * error;
    }

    let count = normals.len() as f64;
    let stats = QuantizationStats {
        encoding: config.encoding,
        bits: config.bits,
        samples: normals.len(),
        max_angular_error_deg: max,
        mean_angular_error_deg: sum / count,
        rms_angular_error_deg: (sum_sq / count).sqrt(),
    };
    info!(
        bits = stats.bits,
        max = stats.max_angular_error_deg,
        mean = stats.mean_angular_error_deg,
        "quantization study complete"
    );
    Ok(stats)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_snorm_endpoints() {
        assert_eq!(quantize_snorm(-1.0, 8), -1.0);
        assert_eq!(quantize_snorm(1.0, 8), 1.0);
        assert_eq!(quantize_snorm(5.0, 8), 1.0);
    }

    #[test]
    fn test_quantize_snorm_truncates() {
        // 0 maps to unorm 0.5, which floors to 127/255 at 8 bits
        let q = quantize_snorm(0.0, 8);
        assert!((q - (127.0 / 255.0 * 2.0 - 1.0)).abs() < 1e-15);
        assert!(q < 0.0);
    }

    #[test]
    fn test_hemisphere_samples_are_unit_upper() {
        let samples = hemisphere_samples(16);
        assert_eq!(samples.len(), 256);
        for n in samples {
            assert!((norm(n) - 1.0).abs() < 1e-12);
            assert!(n[2] > 0.0);
        }
    }

    #[test]
    fn test_angular_error_basics() {
        assert_eq!(angular_error_deg([0.0, 0.0, 1.0], [0.0, 0.0, 1.0]), 0.0);
        let right = angular_error_deg([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!((right - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_roundtrip_outputs_unit_vectors() {
        for encoding in [NormalEncoding::HemiOct, NormalEncoding::ProjectedXy] {
            let n = roundtrip([0.6, 0.0, 0.8], encoding, 8);
            assert!((norm(n) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_more_bits_less_error() {
        let coarse = quantization_study(&QuantizationConfig::new().with_bits(6).with_samples(64))
            .unwrap();
        let fine = quantization_study(&QuantizationConfig::new().with_bits(12).with_samples(64))
            .unwrap();
        assert!(fine.mean_angular_error_deg < coarse.mean_angular_error_deg);
        assert!(fine.max_angular_error_deg < coarse.max_angular_error_deg);
        assert_eq!(fine.samples, 64 * 64);
    }

    #[test]
    fn test_eight_bit_error_is_small() {
        let stats = quantization_study(&QuantizationConfig::new().with_samples(64)).unwrap();
        assert!(stats.mean_angular_error_deg > 0.0);
        assert!(stats.mean_angular_error_deg < 1.0);
        assert!(stats.rms_angular_error_deg >= stats.mean_angular_error_deg);
    }

    #[test]
    fn test_invalid_bits_rejected() {
        assert!(quantization_study(&QuantizationConfig::new().with_bits(0)).is_err());
    }
}
