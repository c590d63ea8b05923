//! Saturation damage classification.
//!
//! A pixel stuck at either extreme (0 or 255) is treated as damaged. The
//! classification of the untouched input is taken once as an immutable
//! [`DamageSnapshot`]; the working [`DamageMap`] starts as a copy of it and is
//! reset from it after every pass.

use common::Buffer2;

use crate::raster::Image;
use crate::roi::Roi;

/// Intensity of a pixel saturated low.
pub const LOW_EXTREME: u8 = 0;
/// Intensity of a pixel saturated high.
pub const HIGH_EXTREME: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DamageState {
    #[default]
    Undamaged,
    /// Candidate for replacement.
    Damaged,
    /// Replaced earlier in the current pass.
    Restored,
}

impl DamageState {
    /// Whether a neighbor in this state may feed the aggregation.
    #[inline]
    pub fn is_valid_source(self) -> bool {
        matches!(self, Self::Undamaged | Self::Restored)
    }

    /// Whether the scheduler updates a pixel in this state.
    #[inline]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Damaged | Self::Restored)
    }
}

#[inline]
pub fn is_saturated(value: u8) -> bool {
    value == LOW_EXTREME || value == HIGH_EXTREME
}

/// Classification of the pre-restoration image. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageSnapshot {
    damaged: Buffer2<bool>,
    count: usize,
}

impl DamageSnapshot {
    pub fn width(&self) -> usize {
        self.damaged.width()
    }

    pub fn height(&self) -> usize {
        self.damaged.height()
    }

    #[inline]
    pub fn is_damaged(&self, x: usize, y: usize) -> bool {
        *self.damaged.get(x, y)
    }

    #[inline]
    pub fn state(&self, x: usize, y: usize) -> DamageState {
        if self.is_damaged(x, y) {
            DamageState::Damaged
        } else {
            DamageState::Undamaged
        }
    }

    /// Number of damaged pixels in the whole image.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of damaged pixels inside `roi`.
    pub fn count_in(&self, roi: &Roi) -> usize {
        roi.positions()
            .filter(|&(x, y)| self.is_damaged(x, y))
            .count()
    }
}

/// Scans the image once and marks every saturated pixel.
pub fn classify(image: &Image) -> DamageSnapshot {
    let damaged = image.as_buffer().map(|&v| is_saturated(v));
    let count = damaged.iter().filter(|&&d| d).count();
    DamageSnapshot { damaged, count }
}

/// Working per-pass classification, same dimensions as the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageMap {
    states: Buffer2<DamageState>,
}

impl DamageMap {
    pub fn from_snapshot(snapshot: &DamageSnapshot) -> Self {
        Self {
            states: snapshot.damaged.map(|&d| {
                if d {
                    DamageState::Damaged
                } else {
                    DamageState::Undamaged
                }
            }),
        }
    }

    pub fn width(&self) -> usize {
        self.states.width()
    }

    pub fn height(&self) -> usize {
        self.states.height()
    }

    #[inline]
    pub fn state(&self, x: usize, y: usize) -> DamageState {
        *self.states.get(x, y)
    }

    /// State at `(x + dx, y + dy)`, or `None` outside the frame.
    #[inline]
    pub fn neighbor(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<DamageState> {
        self.states
            .offset(x, y, dx, dy)
            .map(|(nx, ny)| *self.states.get(nx, ny))
    }

    #[inline]
    pub fn mark_restored(&mut self, x: usize, y: usize) {
        *self.states.get_mut(x, y) = DamageState::Restored;
    }

    /// Re-derives the state of every cell in `roi` from the snapshot, so
    /// originally saturated pixels become `Damaged` again regardless of their
    /// current value.
    pub fn reset(&mut self, snapshot: &DamageSnapshot, roi: &Roi) {
        debug_assert!(self.states.same_size(&snapshot.damaged));
        for (x, y) in roi.positions() {
            *self.states.get_mut(x, y) = snapshot.state(x, y);
        }
    }

    pub fn count(&self, state: DamageState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }
}
