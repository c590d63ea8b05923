//! Weighted aggregation over the 3x3 neighborhood of a damaged pixel.

use crate::damage::DamageMap;
use crate::kernel::weight;
use crate::raster::Image;

/// Neighbor offsets in raster order, center excluded.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Normalized neighbor weights and the matching weighted intensity sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// Sum of the normalized weights, in `[0, 1]`.
    pub total_weight: f64,
    /// Sum of `weight * intensity` over the same neighbors.
    pub weighted_sum: f64,
    /// Number of neighbors that contributed.
    pub valid_count: usize,
}

impl Aggregate {
    /// `(1 − total_weight) · old + weighted_sum`.
    #[inline]
    pub fn blend(&self, old: f64) -> f64 {
        (1.0 - self.total_weight) * old + self.weighted_sum
    }
}

/// Aggregates the valid neighbors of `(x, y)`.
///
/// A neighbor is valid if it is in frame and currently `Undamaged` or
/// `Restored`. Each weight is divided by the number of valid neighbors.
/// Returns `None` if no neighbor is valid.
pub fn aggregate(
    image: &Image,
    damage: &DamageMap,
    x: usize,
    y: usize,
    alpha: f64,
) -> Option<Aggregate> {
    let mut sources = [0u8; 8];
    let mut valid_count = 0;
    for (dx, dy) in NEIGHBOR_OFFSETS {
        let valid = damage
            .neighbor(x, y, dx, dy)
            .is_some_and(|state| state.is_valid_source());
        if valid {
            // Same offset is in frame for the image: both grids share dimensions.
            sources[valid_count] = image.neighbor(x, y, dx, dy)?;
            valid_count += 1;
        }
    }

    if valid_count == 0 {
        return None;
    }

    let center = image.get(x, y) as f64;
    let count = valid_count as f64;
    let mut total_weight = 0.0;
    let mut weighted_sum = 0.0;
    for &source in &sources[..valid_count] {
        let value = source as f64;
        let w = weight(alpha, value - center) / count;
        total_weight += w;
        weighted_sum += value * w;
    }

    Some(Aggregate {
        total_weight,
        weighted_sum,
        valid_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::{classify, DamageMap, DamageState};

    fn uniform_with_center(value: u8, center: u8) -> Image {
        let mut image = Image::filled(3, 3, value);
        image.set(1, 1, center);
        image
    }

    #[test]
    fn test_uniform_neighbors_equal_to_center() {
        // diff = 0 for all 8 neighbors: each contributes 1/8.
        let image = uniform_with_center(100, 100);
        let mut damage = DamageMap::from_snapshot(&classify(&image));
        damage.mark_restored(1, 1);

        let agg = aggregate(&image, &damage, 1, 1, 255.0).unwrap();
        assert_eq!(agg.valid_count, 8);
        assert_eq!(agg.total_weight, 1.0);
        assert_eq!(agg.weighted_sum, 100.0);
        assert_eq!(agg.blend(100.0), 100.0);
    }

    #[test]
    fn test_saturated_center_among_uniform_neighbors() {
        let image = uniform_with_center(100, 255);
        let damage = DamageMap::from_snapshot(&classify(&image));

        let agg = aggregate(&image, &damage, 1, 1, 255.0).unwrap();
        // Every neighbor: (1 − 155/255)² / 8.
        let w = (100.0f64 / 255.0).powi(2);
        assert_eq!(agg.valid_count, 8);
        assert!((agg.total_weight - w).abs() < 1e-12, "{agg:?}");
        assert!((agg.weighted_sum - 100.0 * w).abs() < 1e-9, "{agg:?}");
        assert_eq!(agg.blend(255.0) as u8, 231);
    }

    #[test]
    fn test_center_is_never_a_source() {
        // Center marked Undamaged still does not feed its own update.
        let image = uniform_with_center(100, 40);
        let damage = DamageMap::from_snapshot(&classify(&image));
        assert_eq!(damage.state(1, 1), DamageState::Undamaged);

        let agg = aggregate(&image, &damage, 1, 1, 255.0).unwrap();
        assert_eq!(agg.valid_count, 8);
    }

    #[test]
    fn test_damaged_neighbors_are_excluded() {
        // Left column saturated; only 5 neighbors remain valid.
        let image = Image::new(3, 3, vec![0, 80, 80, 255, 0, 80, 0, 80, 80]).unwrap();
        let damage = DamageMap::from_snapshot(&classify(&image));

        let agg = aggregate(&image, &damage, 1, 1, 255.0).unwrap();
        assert_eq!(agg.valid_count, 5);
        let w = weight(255.0, 80.0) / 5.0;
        assert!((agg.total_weight - 5.0 * w).abs() < 1e-12);
        assert!((agg.weighted_sum - 5.0 * 80.0 * w).abs() < 1e-9);
    }

    #[test]
    fn test_restored_neighbors_count_as_sources() {
        let image = Image::filled(3, 3, 255);
        let mut damage = DamageMap::from_snapshot(&classify(&image));
        assert!(aggregate(&image, &damage, 1, 1, 255.0).is_none());

        damage.mark_restored(0, 0);
        let agg = aggregate(&image, &damage, 1, 1, 255.0).unwrap();
        assert_eq!(agg.valid_count, 1);
        assert_eq!(agg.total_weight, 1.0);
        assert_eq!(agg.weighted_sum, 255.0);
    }

    #[test]
    fn test_no_valid_neighbors_is_none() {
        let image = Image::filled(3, 3, 0);
        let damage = DamageMap::from_snapshot(&classify(&image));
        assert_eq!(aggregate(&image, &damage, 1, 1, 255.0), None);
    }

    #[test]
    fn test_out_of_frame_neighbors_are_absent() {
        // Corner pixel: only 3 neighbors exist.
        let image = uniform_with_center(60, 60);
        let damage = DamageMap::from_snapshot(&classify(&image));

        let agg = aggregate(&image, &damage, 0, 0, 255.0).unwrap();
        assert_eq!(agg.valid_count, 3);
        assert!((agg.total_weight - 1.0).abs() < 1e-12);
        assert!((agg.weighted_sum - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_distant_neighbors_get_zero_weight() {
        let image = uniform_with_center(200, 10);
        let mut damage = DamageMap::from_snapshot(&classify(&image));
        damage.mark_restored(1, 1);

        // |diff| = 190 > alpha
        let agg = aggregate(&image, &damage, 1, 1, 100.0).unwrap();
        assert_eq!(agg.valid_count, 8);
        assert_eq!(agg.total_weight, 0.0);
        assert_eq!(agg.weighted_sum, 0.0);
        assert_eq!(agg.blend(10.0), 10.0);
    }
}
