//! Fidelity diagnostics against a known-good reference.
//!
//! Reporting only; nothing here feeds back into restoration.

use crate::error::Result;
use crate::raster::Image;

/// Peak intensity of an 8-bit image.
const PEAK: f64 = 255.0;

/// Mean squared per-pixel difference over the whole image.
pub fn mse(image: &Image, reference: &Image) -> Result<f64> {
    reference.check_same_size(image)?;

    let pixel_count = image.pixels().len();
    if pixel_count == 0 {
        return Ok(0.0);
    }
    let sum: f64 = image
        .pixels()
        .iter()
        .zip(reference.pixels())
        .map(|(&a, &b)| {
            let d = a as f64 - b as f64;
            d * d
        })
        .sum();

    Ok(sum / pixel_count as f64)
}

/// Peak signal-to-noise ratio in dB for a given MSE. Infinite for identical
/// images.
pub fn psnr(mse: f64) -> f64 {
    if mse == 0.0 {
        f64::INFINITY
    } else {
        20.0 * (PEAK / mse.sqrt()).log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_identical_images() {
        let a = Image::filled(4, 4, 77);
        let mse = mse(&a, &a.clone()).unwrap();
        assert_eq!(mse, 0.0);
        assert_eq!(psnr(mse), f64::INFINITY);
    }

    #[test]
    fn test_mse_known_value() {
        // Differences 0, 2, 4, 6 -> (0 + 4 + 16 + 36) / 4 = 14
        let a = Image::new(2, 2, vec![10, 12, 14, 16]).unwrap();
        let b = Image::new(2, 2, vec![10, 10, 10, 10]).unwrap();
        assert_eq!(mse(&a, &b).unwrap(), 14.0);
        assert_eq!(mse(&b, &a).unwrap(), 14.0);
    }

    #[test]
    fn test_psnr_known_value() {
        // MSE of 1 -> 20·log10(255) ≈ 48.13 dB
        assert!((psnr(1.0) - 48.130_803_6).abs() < 1e-6);
        // MSE of 255² -> 0 dB
        assert!(psnr(255.0 * 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_size_mismatch() {
        let a = Image::filled(4, 4, 0);
        let b = Image::filled(4, 3, 0);
        assert!(matches!(mse(&a, &b), Err(Error::DimensionMismatch { .. })));
    }
}
