use std::fmt;

use crate::config::BorderPolicy;
use crate::error::{Error, Result};

/// Square region of interest: origin `(x, y)` and side length `extent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roi {
    pub x: usize,
    pub y: usize,
    pub extent: usize,
}

impl Roi {
    pub fn new(x: usize, y: usize, extent: usize) -> Self {
        Self { x, y, extent }
    }

    /// Largest region that keeps a one-pixel margin inside a `width`x`height`
    /// image, or `None` if the image is too small to have an interior.
    pub fn interior(width: usize, height: usize) -> Option<Self> {
        let extent = width.min(height).checked_sub(2).filter(|&e| e > 0)?;
        Some(Self::new(1, 1, extent))
    }

    #[inline]
    pub fn x_end(&self) -> usize {
        self.x + self.extent
    }

    #[inline]
    pub fn y_end(&self) -> usize {
        self.y + self.extent
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x..self.x_end()).contains(&x) && (self.y..self.y_end()).contains(&y)
    }

    /// Row-major positions: increasing `y`, then increasing `x`.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let (x0, x1) = (self.x, self.x_end());
        (self.y..self.y_end()).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }

    /// Checks the region against the image bounds and the border policy.
    pub fn validate(&self, width: usize, height: usize, border: BorderPolicy) -> Result<()> {
        let fail = |reason| {
            Err(Error::InvalidRoi {
                roi: *self,
                width,
                height,
                reason,
            })
        };

        if self.extent == 0 {
            return fail("extent must be positive");
        }
        let (Some(x_end), Some(y_end)) = (
            self.x.checked_add(self.extent),
            self.y.checked_add(self.extent),
        ) else {
            return fail("region overflows");
        };
        if x_end > width || y_end > height {
            return fail("region extends past the image");
        }
        if border == BorderPolicy::RequireMargin
            && (self.x == 0 || self.y == 0 || x_end == width || y_end == height)
        {
            return fail("region must leave a one-pixel margin at the image border");
        }

        Ok(())
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) +{}", self.x, self.y, self.extent)
    }
}
