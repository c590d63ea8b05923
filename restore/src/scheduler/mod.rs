//! Multi-pass restoration scheduler.
//!
//! Every pass sweeps the region of interest in row-major order and replaces
//! each pending pixel with
//!
//! ```text
//! new = (1 − Σw) · old + Σ(w · neighbor)
//! ```
//!
//! The write goes straight into the image, so pixels visited later in the
//! same sweep already see it (Gauss-Seidel order, not Jacobi). A replaced
//! pixel is marked `Restored` and becomes a valid source for its
//! successors. After the sweep the region's classification is reset from
//! the snapshot of the original input, so every originally saturated pixel
//! is estimated again on the next pass from better neighbors.
//!
//! The number of passes is fixed. There is no convergence test.


use crate::aggregate::aggregate;
use crate::config::RestoreConfig;
use crate::damage::{classify, DamageMap, DamageSnapshot};
use crate::error::Result;
use crate::raster::Image;
use crate::roi::Roi;

/// Outcome of a single sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Pixels whose value was replaced.
    pub updated: usize,
    /// Pending pixels left unchanged because no neighbor was valid.
    pub skipped: usize,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub passes: usize,
    /// Originally saturated pixels inside the region.
    pub damaged_in_roi: usize,
    /// Pixel replacements summed over all passes.
    pub updates: usize,
    /// No-valid-neighbor skips summed over all passes.
    pub skipped: usize,
    /// Pending pixels skipped in the last pass.
    pub unresolved: usize,
}

/// Restoration state for one image and one region.
///
/// Owns the damage snapshot and the working map; the image is borrowed
/// mutably per pass so the caller keeps ownership.
#[derive(Debug, Clone)]
pub struct Restorer {
    snapshot: DamageSnapshot,
    damage: DamageMap,
    roi: Roi,
    config: RestoreConfig,
}

impl Restorer {
    /// Validates the run and classifies the untouched image.
    pub fn new(image: &Image, roi: Roi, config: RestoreConfig) -> Result<Self> {
        config.validate()?;
        roi.validate(image.width(), image.height(), config.border)?;

        let snapshot = classify(image);
        let damage = DamageMap::from_snapshot(&snapshot);

        Ok(Self {
            snapshot,
            damage,
            roi,
            config,
        })
    }

    pub fn snapshot(&self) -> &DamageSnapshot {
        &self.snapshot
    }

    pub fn damage_map(&self) -> &DamageMap {
        &self.damage
    }

    pub fn roi(&self) -> Roi {
        self.roi
    }

    pub fn config(&self) -> &RestoreConfig {
        &self.config
    }

    /// One in-place sweep followed by the reset from the snapshot.
    ///
    /// # Panics
    ///
    /// Panics if `image` is not the size of the image this restorer was
    /// created for.
    pub fn run_pass(&mut self, image: &mut Image) -> PassStats {
        assert!(
            image.width() == self.snapshot.width() && image.height() == self.snapshot.height(),
            "image {}x{} does not match damage map {}x{}",
            image.width(),
            image.height(),
            self.snapshot.width(),
            self.snapshot.height(),
        );

        let mut stats = PassStats::default();
        for (x, y) in self.roi.positions() {
            if !self.damage.state(x, y).is_pending() {
                continue;
            }
            let Some(agg) = aggregate(image, &self.damage, x, y, self.config.alpha) else {
                stats.skipped += 1;
                continue;
            };

            // Convex blend of intensities stays within [0, 255]; the cast
            // truncates toward zero.
            let value = agg.blend(image.get(x, y) as f64);
            image.set(x, y, value as u8);
            self.damage.mark_restored(x, y);
            stats.updated += 1;
        }

        self.damage.reset(&self.snapshot, &self.roi);
        stats
    }

    /// Runs every configured pass.
    pub fn run(&mut self, image: &mut Image) -> RestoreReport {
        let damaged_in_roi = self.snapshot.count_in(&self.roi);
        tracing::info!(
            width = image.width(),
            height = image.height(),
            roi = %self.roi,
            passes = self.config.passes,
            alpha = self.config.alpha,
            damaged = damaged_in_roi,
            "Starting restoration"
        );

        let mut report = RestoreReport {
            damaged_in_roi,
            ..Default::default()
        };
        for pass in 0..self.config.passes {
            let stats = self.run_pass(image);
            tracing::debug!(
                pass,
                updated = stats.updated,
                skipped = stats.skipped,
                "Pass complete"
            );
            report.passes += 1;
            report.updates += stats.updated;
            report.skipped += stats.skipped;
            report.unresolved = stats.skipped;
        }

        if report.unresolved > 0 {
            tracing::warn!(
                unresolved = report.unresolved,
                "Damaged pixels without any valid neighbor were left unchanged"
            );
        }
        tracing::info!(
            passes = report.passes,
            updates = report.updates,
            "Restoration finished"
        );

        report
    }
}

/// Restores the saturated pixels of `image` inside `roi` in place.
pub fn restore(image: &mut Image, roi: Roi, config: &RestoreConfig) -> Result<RestoreReport> {
    let mut restorer = Restorer::new(image, roi, *config)?;
    Ok(restorer.run(image))
}
