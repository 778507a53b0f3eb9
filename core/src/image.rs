use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use log::{debug, trace};

use crate::{
    color,
    error::{FormatError, Result},
};

pub const DEFAULT_WIDTH: usize = 8;
pub const DEFAULT_HEIGHT: usize = 8;
pub const BYTES_PER_PIXEL: usize = 3;

/// Sprite size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Dimensions {
    /// Rejects zero sizes and sizes whose raw byte length overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let invalid = FormatError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid.into());
        }
        width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
            .ok_or(invalid)?;
        Ok(Dimensions { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Exact number of raw bytes an image of this size occupies.
    pub fn byte_len(&self) -> usize {
        self.pixel_count() * BYTES_PER_PIXEL
    }
}

/// Raw interleaved RGB bytes whose length matches its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    dimensions: Dimensions,
    data: Vec<u8>,
}

impl ImageBuffer {
    pub fn new(dimensions: Dimensions, data: Vec<u8>) -> Result<Self> {
        let expected = dimensions.byte_len();
        if data.len() != expected {
            return Err(FormatError::SizeMismatch {
                expected,
                actual: data.len(),
            }
            .into());
        }
        debug!(
            "Validated {}x{} image ({} bytes)",
            dimensions.width, dimensions.height, expected
        );
        Ok(ImageBuffer { dimensions, data })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixels in row-major order, one per byte triplet.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb888> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|p| Rgb888::new(p[0], p[1], p[2]))
    }

    /// Packs every pixel, keeping input order.
    pub fn pack(&self) -> Vec<u16> {
        let mut packed = Vec::with_capacity(self.dimensions.pixel_count());
        for (idx, pixel) in self.pixels().enumerate() {
            let value = color::pack_pixel(pixel);
            trace!("Pixel {}: {:?} -> {:04X}", idx, pixel, value);
            packed.push(value);
        }
        packed
    }
}
