//! Frame driver.
//!
//! [`SoftwareRenderer`] is one render session: it owns the configuration and
//! the supersample buffer, rasterizes the primitives a scene walker feeds it,
//! and resolves the finished frame into a caller-owned [`Framebuffer`].
//!
//! # Example
//!
//! ```
//! use trueno_raster::prelude::*;
//!
//! let config = RenderConfig::new(32, 32).with_sample_rate(4);
//! let mut renderer = SoftwareRenderer::new(config).unwrap();
//!
//! renderer.rasterize(&Primitive::triangle(
//!     Point::new(4.0, 4.0),
//!     Point::new(28.0, 8.0),
//!     Point::new(12.0, 28.0),
//!     Rgba::BLUE,
//! ));
//! renderer.rasterize(&Primitive::line(0.0, 31.0, 31.0, 0.0, Rgba::BLACK));
//!
//! let mut frame = renderer.new_framebuffer().unwrap();
//! renderer.resolve(&mut frame).unwrap();
//! assert_eq!(frame.get_pixel(0, 0), Some(Rgba::WHITE));
//! ```

use crate::color::Rgba;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::render::Primitive;
use crate::supersample::SupersampleBuffer;
use crate::texture::Filter;

/// A supersampling software render session.
#[derive(Debug, Clone)]
pub struct SoftwareRenderer {
    config: RenderConfig,
    target: SupersampleBuffer,
}

impl SoftwareRenderer {
    /// Create a session and allocate its supersample buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the buffer cannot
    /// be allocated.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        let target = SupersampleBuffer::with_background(
            config.width,
            config.height,
            config.sample_rate,
            config.background,
        )?;
        log::debug!(
            "created renderer: {}x{} output, rate {}, {:?} filtering",
            config.width,
            config.height,
            config.sample_rate,
            config.filter
        );
        Ok(Self { config, target })
    }

    /// Change output size and sample rate together.
    ///
    /// The supersample buffer is reallocated and reset to the background,
    /// even if nothing changed. On error the session keeps its previous
    /// configuration and contents.
    pub fn configure(&mut self, width: u32, height: u32, sample_rate: u32) -> Result<()> {
        self.target.configure(width, height, sample_rate)?;
        self.config.width = width;
        self.config.height = height;
        self.config.sample_rate = sample_rate;
        Ok(())
    }

    /// Change the sample rate, keeping the output size.
    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<()> {
        self.configure(self.config.width, self.config.height, sample_rate)
    }

    /// Change the output size, keeping the sample rate.
    pub fn set_target_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.configure(width, height, self.config.sample_rate)
    }

    /// Set the background used by the next clear or reconfiguration.
    pub fn set_background(&mut self, background: Rgba) {
        self.config.background = background;
        self.target.set_background(background);
    }

    /// Set the filter used for textured quads.
    pub fn set_filter(&mut self, filter: Filter) {
        self.config.filter = filter;
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The supersample buffer being drawn into.
    #[must_use]
    pub const fn target(&self) -> &SupersampleBuffer {
        &self.target
    }

    /// Allocate an output framebuffer matching the configured size.
    pub fn new_framebuffer(&self) -> Result<Framebuffer> {
        Framebuffer::new(self.config.width, self.config.height)
    }

    /// Reset every sample to the background without reallocating.
    pub fn clear(&mut self) {
        self.target.clear();
    }

    /// Rasterize one primitive into the supersample buffer.
    pub fn rasterize(&mut self, primitive: &Primitive<'_>) {
        if let Primitive::TexturedQuad { texture, .. } = primitive {
            if self.config.filter == Filter::Trilinear && !texture.is_mipmapped() {
                log::warn!(
                    "trilinear sampling of a {}x{} texture with {} mip level(s); generate mips first",
                    texture.width(),
                    texture.height(),
                    texture.level_count()
                );
            }
        }
        primitive.rasterize(&mut self.target, self.config.filter);
    }

    /// Box-filter the supersample buffer into `output`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`](crate::Error::InvalidDimensions)
    /// if `output` does not match the configured size.
    pub fn resolve(&self, output: &mut Framebuffer) -> Result<()> {
        self.target.resolve(output)
    }

    /// Render a whole frame: clear, rasterize `primitives` in order, resolve.
    pub fn draw_frame(
        &mut self,
        primitives: &[Primitive<'_>],
        output: &mut Framebuffer,
    ) -> Result<()> {
        self.clear();
        for primitive in primitives {
            self.rasterize(primitive);
        }
        log::trace!("rasterized {} primitive(s)", primitives.len());
        self.resolve(output)
    }
}
