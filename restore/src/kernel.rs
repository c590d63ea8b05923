//! Robust weight kernel.
//!
//! Maps the intensity difference between a neighbor and the pixel under
//! restoration to a weight in `[0, 1]`:
//!
//! ```text
//!            ⎧ 1 − (d/α)²        |d| ≤ α/2
//! w(α, d) =  ⎨ (1 − |d|/α)²      α/2 < |d| ≤ α
//!            ⎩ 0                 |d| > α
//! ```
//!
//! The two branches do not meet at `|d| = α/2`: the inner branch gives 0.75
//! there and the outer branch approaches 0.25 from above. Restored output
//! depends on this exact shape, so the jump is kept.

/// Reference gradient threshold for 8-bit images.
pub const DEFAULT_ALPHA: f64 = 255.0;

/// Weight of a neighbor whose intensity differs by `diff` from the center.
///
/// `alpha` must be positive.
#[inline]
pub fn weight(alpha: f64, diff: f64) -> f64 {
    debug_assert!(alpha > 0.0, "alpha must be positive, got {alpha}");

    let abs = diff.abs();
    if abs <= alpha / 2.0 {
        1.0 - diff * diff / alpha / alpha
    } else if abs <= alpha {
        let t = 1.0 - abs / alpha;
        t * t
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_difference_is_full_weight() {
        for alpha in [1.0, 17.5, 128.0, DEFAULT_ALPHA] {
            assert_eq!(weight(alpha, 0.0), 1.0, "alpha = {alpha}");
        }
    }

    #[test]
    fn test_beyond_alpha_is_zero() {
        assert_eq!(weight(255.0, 255.5), 0.0);
        assert_eq!(weight(255.0, -256.0), 0.0);
        assert_eq!(weight(10.0, 10.000001), 0.0);
    }

    #[test]
    fn test_at_alpha_is_zero() {
        // Outer branch reaches exactly zero at |d| = α.
        assert_eq!(weight(255.0, 255.0), 0.0);
        assert_eq!(weight(255.0, -255.0), 0.0);
    }

    #[test]
    fn test_symmetric_in_sign() {
        for d in [0.5, 31.0, 127.5, 128.0, 200.0] {
            assert_eq!(weight(255.0, d), weight(255.0, -d), "d = {d}");
        }
    }

    #[test]
    fn test_discontinuity_at_half_alpha() {
        // |d| = α/2 belongs to the inner branch: 1 − 0.25.
        assert_eq!(weight(1.0, 0.5), 0.75);
        assert_eq!(weight(255.0, 127.5), 0.75);
        assert_eq!(weight(255.0, -127.5), 0.75);

        // Just past α/2 the outer branch takes over near 0.25.
        let outer = weight(1.0, 0.5 + 1e-9);
        assert!((outer - 0.25).abs() < 1e-8, "outer = {outer}");
        assert!(weight(1.0, 0.5) - outer > 0.49);
    }

    #[test]
    fn test_inner_branch_values() {
        // 1 − (100/255)²
        let w = weight(255.0, 100.0);
        assert!((w - 0.846_212_995).abs() < 1e-9, "w = {w}");
    }

    #[test]
    fn test_outer_branch_values() {
        // (1 − 155/255)² = (100/255)²
        let w = weight(255.0, -155.0);
        assert!((w - 0.153_787_004).abs() < 1e-9, "w = {w}");
    }

    #[test]
    fn test_monotone_within_each_branch() {
        let alpha = 255.0;
        let mut prev = weight(alpha, 0.0);
        for d in 1..=127 {
            let w = weight(alpha, d as f64);
            assert!(w < prev, "inner branch not decreasing at {d}");
            prev = w;
        }
        let mut prev = weight(alpha, 128.0);
        for d in 129..=255 {
            let w = weight(alpha, d as f64);
            assert!(w < prev, "outer branch not decreasing at {d}");
            prev = w;
        }
    }
}
