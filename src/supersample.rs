//! Supersample buffer.
//!
//! Stores `sample_rate²` independent color samples per output pixel. Every
//! primitive writes fractional coverage into this store; a single box-filter
//! [`resolve`](SupersampleBuffer::resolve) at the end of the frame produces
//! the visible, anti-aliased pixels.

use crate::color::{Color, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::{Framebuffer, BYTES_PER_PIXEL};

/// Row-major store of `width*sample_rate × height*sample_rate` colors.
///
/// The dimensions always match the most recent successful
/// [`configure`](Self::configure); nothing else reallocates the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SupersampleBuffer {
    /// Output width in pixels.
    width: u32,
    /// Output height in pixels.
    height: u32,
    /// Samples per output pixel along each axis.
    sample_rate: u32,
    /// Color every sample is reset to.
    background: Color,
    samples: Vec<Color>,
}

impl SupersampleBuffer {
    /// Allocate a buffer for a `width × height` output, filled with opaque
    /// white.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension or the sample rate is zero, or if the
    /// store cannot be allocated.
    pub fn new(width: u32, height: u32, sample_rate: u32) -> Result<Self> {
        Self::with_background(width, height, sample_rate, Rgba::WHITE)
    }

    /// Allocate a buffer filled with `background`.
    pub fn with_background(
        width: u32,
        height: u32,
        sample_rate: u32,
        background: Rgba,
    ) -> Result<Self> {
        let background = Color::from(background);
        let samples = allocate(width, height, sample_rate, background)?;
        Ok(Self {
            width,
            height,
            sample_rate,
            background,
            samples,
        })
    }

    /// Reallocate for a new output size and sample rate.
    ///
    /// Always discards the previous contents and refills with the background,
    /// even when the parameters are unchanged. On error the existing buffer
    /// is left untouched.
    pub fn configure(&mut self, width: u32, height: u32, sample_rate: u32) -> Result<()> {
        let samples = allocate(width, height, sample_rate, self.background)?;
        self.samples = samples;
        self.width = width;
        self.height = height;
        self.sample_rate = sample_rate;

        log::debug!(
            "configured supersample buffer: {}x{} output, rate {} ({}x{} samples)",
            width,
            height,
            sample_rate,
            self.super_width(),
            self.super_height()
        );
        Ok(())
    }

    /// Set the color used by subsequent [`clear`](Self::clear) and
    /// [`configure`](Self::configure) calls.
    pub fn set_background(&mut self, background: Rgba) {
        self.background = Color::from(background);
    }

    /// Reset every sample to the background without reallocating.
    pub fn clear(&mut self) {
        self.samples.fill(self.background);
    }

    /// Output width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Samples per output pixel along each axis.
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Width of the sample grid.
    #[must_use]
    pub const fn super_width(&self) -> u32 {
        self.width * self.sample_rate
    }

    /// Height of the sample grid.
    #[must_use]
    pub const fn super_height(&self) -> u32 {
        self.height * self.sample_rate
    }

    /// All samples, row-major.
    #[must_use]
    pub fn samples(&self) -> &[Color] {
        &self.samples
    }

    /// Sample at `(sx, sy)`, or `None` if out of bounds.
    #[must_use]
    pub fn sample(&self, sx: i32, sy: i32) -> Option<Color> {
        self.index(sx, sy).map(|idx| self.samples[idx])
    }

    /// Composite `color` over the sample at `(sx, sy)`.
    ///
    /// `out.rgb = (1 - a) * dst.rgb * dst.a + a * color.rgb` and
    /// `out.a = (1 - a) * dst.a + a`, where `a = color.a`, clamped to
    /// `[0, 1]`. Coordinates outside the grid are clipped silently.
    ///
    /// The destination color is weighted by its own alpha, so even a fully
    /// transparent write over a translucent sample changes its color.
    #[inline]
    pub fn blend(&mut self, sx: i32, sy: i32, color: Color) {
        let Some(idx) = self.index(sx, sy) else {
            return;
        };
        let a = color.a.clamp(0.0, 1.0);
        let dst = self.samples[idx];
        let keep = (1.0 - a) * dst.a;
        self.samples[idx] = Color::new(
            keep * dst.r + a * color.r,
            keep * dst.g + a * color.g,
            keep * dst.b + a * color.b,
            keep + a,
        )
        .clamped();
    }

    /// Box-filter the samples down into `output`.
    ///
    /// Each output pixel becomes the unweighted mean of its
    /// `sample_rate × sample_rate` block, rounded to 8 bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `output` is not
    /// `width × height`.
    pub fn resolve(&self, output: &mut Framebuffer) -> Result<()> {
        if output.width() != self.width || output.height() != self.height {
            return Err(Error::InvalidDimensions {
                width: output.width(),
                height: output.height(),
            });
        }

        let rate = self.sample_rate as usize;
        let super_w = self.super_width() as usize;
        let weight = 1.0 / (rate * rate) as f32;
        let stride = output.stride();
        let pixels = output.pixels_mut();

        for y in 0..self.height as usize {
            let row = &mut pixels[y * stride..(y + 1) * stride];
            for (x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let mut sum = Color::TRANSPARENT;
                for sy in y * rate..(y + 1) * rate {
                    let start = sy * super_w + x * rate;
                    for &sample in &self.samples[start..start + rate] {
                        sum += sample;
                    }
                }
                pixel.copy_from_slice(&(sum * weight).to_rgba8().to_array());
            }
        }

        log::trace!(
            "resolved {}x{} samples into {}x{} output",
            self.super_width(),
            self.super_height(),
            self.width,
            self.height
        );
        Ok(())
    }

    #[inline]
    fn index(&self, sx: i32, sy: i32) -> Option<usize> {
        if sx < 0 || sy < 0 {
            return None;
        }
        let (x, y) = (sx as u32, sy as u32);
        if x >= self.super_width() || y >= self.super_height() {
            return None;
        }
        Some((y as usize) * (self.super_width() as usize) + (x as usize))
    }
}

/// Allocate and fill a sample store, reporting exhaustion as an error.
fn allocate(width: u32, height: u32, sample_rate: u32, background: Color) -> Result<Vec<Color>> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    if sample_rate == 0 {
        return Err(Error::InvalidSampleRate(sample_rate));
    }

    // The grid must stay addressable by i32 sample coordinates.
    let grid = |side: u32| {
        side.checked_mul(sample_rate)
            .filter(|&s| i32::try_from(s).is_ok())
            .map(|s| s as usize)
    };
    let count = grid(width)
        .zip(grid(height))
        .and_then(|(w, h)| w.checked_mul(h));
    let Some(count) = count else {
        return Err(Error::AllocationFailed { bytes: usize::MAX });
    };
    let bytes = count.saturating_mul(std::mem::size_of::<Color>());

    let mut samples = Vec::new();
    samples
        .try_reserve_exact(count)
        .map_err(|_| Error::AllocationFailed { bytes })?;
    samples.resize(count, background);
    Ok(samples)
}
