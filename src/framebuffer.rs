//! Output framebuffer.
//!
//! The caller-owned RGBA target that [`SupersampleBuffer::resolve`] writes
//! into. Pixels are tightly packed, row-major, top-to-bottom, 4 bytes per
//! pixel in R, G, B, A order.
//!
//! [`SupersampleBuffer::resolve`]: crate::supersample::SupersampleBuffer::resolve

use crate::color::{Color, Rgba};
use crate::error::{Error, Result};
use trueno::Vector;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Tightly packed RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA pixels in row-major order.
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a new framebuffer with the given dimensions, zero-filled.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_raster::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let size = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
        Ok(Self {
            width,
            height,
            pixels: vec![0; size],
        })
    }

    /// Wrap an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or `pixels` is not exactly
    /// `4 * width * height` bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_raster::framebuffer::Framebuffer;
    /// use trueno_raster::Error;
    ///
    /// let fb = Framebuffer::from_pixels(2, 1, vec![255; 8]).unwrap();
    /// assert_eq!(fb.pixel_count(), 2);
    ///
    /// let err = Framebuffer::from_pixels(2, 1, vec![255; 7]).unwrap_err();
    /// assert!(matches!(err, Error::PixelDataMismatch { expected: 8, actual: 7 }));
    /// ```
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(Error::PixelDataMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the stride (row width in bytes).
    #[must_use]
    pub const fn stride(&self) -> usize {
        (self.width as usize) * BYTES_PER_PIXEL
    }

    /// Get the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Get the raw pixel data as a slice.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get the raw pixel data as a mutable slice.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Clear the framebuffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Mean color over every pixel, normalized to `[0, 1]`.
    ///
    /// Per-channel reductions use trueno's SIMD vectors.
    #[must_use]
    pub fn mean_color(&self) -> Color {
        mean_rgba(&self.pixels)
    }

    /// Calculate the byte index for a pixel coordinate.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride() + (x as usize) * BYTES_PER_PIXEL
    }
}

/// Mean of interleaved RGBA bytes, normalized to `[0, 1]`.
///
/// Returns transparent black for an empty slice.
pub(crate) fn mean_rgba(bytes: &[u8]) -> Color {
    let channel_mean = |channel: usize| -> f32 {
        let values: Vec<f32> = bytes
            .iter()
            .skip(channel)
            .step_by(BYTES_PER_PIXEL)
            .map(|&b| f32::from(b))
            .collect();
        if values.is_empty() {
            return 0.0;
        }
        Vector::from_vec(values).mean().unwrap_or(0.0) / 255.0
    };

    Color::new(channel_mean(0), channel_mean(1), channel_mean(2), channel_mean(3))
}
