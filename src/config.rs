//! Render session configuration.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::texture::Filter;

/// Configuration for a [`SoftwareRenderer`](crate::renderer::SoftwareRenderer).
///
/// # Example
///
/// ```
/// use trueno_raster::config::RenderConfig;
/// use trueno_raster::texture::Filter;
///
/// let config = RenderConfig::new(640, 480)
///     .with_sample_rate(4)
///     .with_filter(Filter::Bilinear);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.supersample_width(), Some(2560));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Supersamples per output pixel along each axis.
    pub sample_rate: u32,
    /// Color the supersample buffer is reset to.
    pub background: Rgba,
    /// Filter used when rasterizing textured quads.
    pub filter: Filter,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            sample_rate: 1,
            background: Rgba::WHITE,
            filter: Filter::Trilinear,
        }
    }
}

impl RenderConfig {
    /// Create a configuration for the given output size with default settings.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the sample rate.
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    /// Set the texture filter.
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Check the configuration for values the renderer cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.sample_rate == 0 {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        Ok(())
    }

    /// Supersample buffer width, or `None` on overflow.
    #[must_use]
    pub fn supersample_width(&self) -> Option<u32> {
        self.width.checked_mul(self.sample_rate)
    }

    /// Supersample buffer height, or `None` on overflow.
    #[must_use]
    pub fn supersample_height(&self) -> Option<u32> {
        self.height.checked_mul(self.sample_rate)
    }
}
