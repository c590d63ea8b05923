//! Single-channel 8-bit raster and its file codec.

use std::path::Path;

use common::Buffer2;
use image as image_lib;

use crate::error::{Error, Result};

/// Grayscale image with intensities in `[0, 255]`, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pixels: Buffer2<u8>,
}

impl Image {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::PixelCount {
                expected: width * height,
                got: pixels.len(),
            });
        }
        Ok(Self {
            pixels: Buffer2::new(width, height, pixels),
        })
    }

    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            pixels: Buffer2::new_filled(width, height, value),
        }
    }

    /// Decodes any raster format supported by the `image` crate.
    ///
    /// Color input is reduced to luma.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let decoded = image_lib::open(path)?.into_luma8();
        let (width, height) = decoded.dimensions();
        Self::new(width as usize, height as usize, decoded.into_raw())
    }

    /// Encodes the image, choosing the format from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        image_lib::save_buffer(
            path,
            self.pixels.cells(),
            self.width() as u32,
            self.height() as u32,
            image_lib::ColorType::L8,
        )?;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        *self.pixels.get(x, y)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        *self.pixels.get_mut(x, y) = value;
    }

    /// Intensity at `(x + dx, y + dy)`, or `None` outside the frame.
    #[inline]
    pub fn neighbor(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<u8> {
        self.pixels
            .offset(x, y, dx, dy)
            .map(|(nx, ny)| *self.pixels.get(nx, ny))
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.pixels.cells()
    }

    #[inline]
    pub fn as_buffer(&self) -> &Buffer2<u8> {
        &self.pixels
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.pixels.into_vec()
    }

    pub(crate) fn check_same_size(&self, other: &Image) -> Result<()> {
        if self.pixels.same_size(&other.pixels) {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected_width: self.width(),
                expected_height: self.height(),
                width: other.width(),
                height: other.height(),
            })
        }
    }
}
