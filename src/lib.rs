//! # Trueno-Raster
//!
//! Supersampled CPU rasterizer with mipmapped texture filtering.
//!
//! trueno-raster turns device-space primitives (points, lines, triangles and
//! textured quads) into an 8-bit RGBA image. Every primitive is drawn into a
//! supersample buffer holding `sample_rate²` samples per output pixel; a
//! single box-filter resolve at the end of the frame produces the
//! anti-aliased result. Textures are sampled through a mip chain with
//! nearest, bilinear or trilinear filtering.
//!
//! ## Features
//!
//! - **Pure Rust**: No GPU, no C dependencies
//! - **Supersampling**: Any integer sample rate, resolved with a box filter
//! - **Wu's Lines**: Analytic coverage for one-pixel-wide lines
//! - **Top-left Rule**: Watertight triangle edges without double coverage
//! - **Trilinear Filtering**: Footprint-driven level of detail over a mip chain
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_raster::prelude::*;
//!
//! let mut texture = Texture::checkerboard(64, 64, 8, Rgba::BLACK, Rgba::WHITE)?;
//! texture.generate_mips(0)?;
//!
//! let mut renderer = SoftwareRenderer::new(RenderConfig::new(32, 32).with_sample_rate(4))?;
//! let mut frame = renderer.new_framebuffer()?;
//! renderer.draw_frame(
//!     &[
//!         Primitive::textured_quad(Point::new(0.0, 0.0), Point::new(32.0, 32.0), &texture),
//!         Primitive::line(0.0, 0.0, 31.0, 31.0, Rgba::RED),
//!     ],
//!     &mut frame,
//! )?;
//!
//! let png = PngEncoder::to_bytes(&frame)?;
//! assert!(!png.is_empty());
//! # Ok::<(), trueno_raster::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/deserialize [`RenderConfig`](config::RenderConfig)
//!   and [`Filter`](texture::Filter)
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://crates.io/crates/log) facade;
//! install any logger (e.g. `env_logger`) to see them.
//!
//! ## Academic References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Pineda, J. (1988). "A Parallel Algorithm for Polygon Rasterization." SIGGRAPH '88.
//! - Williams, L. (1983). "Pyramidal Parametrics." SIGGRAPH '83.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types: packed 8-bit RGBA and linear float RGBA.
pub mod color;

/// Caller-owned output framebuffer.
pub mod framebuffer;

/// Device-space geometry.
pub mod geometry;

/// Render session configuration.
pub mod config;

// ============================================================================
// Rasterization Modules
// ============================================================================

/// Supersample store with blend and box-filter resolve.
pub mod supersample;

/// Primitive rasterization (points, lines, triangles, textured quads).
pub mod render;

/// Mipmapped textures and filtered sampling.
pub mod texture;

/// Render session driving the rasterizer frame by frame.
pub mod renderer;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust
/// use trueno_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Color, Rgba};
    pub use crate::config::RenderConfig;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::Point;
    pub use crate::output::PngEncoder;
    pub use crate::render::Primitive;
    pub use crate::renderer::SoftwareRenderer;
    pub use crate::supersample::SupersampleBuffer;
    pub use crate::texture::{Filter, Texture};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<SoftwareRenderer>();
        assert_send_sync::<SupersampleBuffer>();
        assert_send_sync::<Texture>();
        assert_send_sync::<Framebuffer>();
        assert_send_sync::<Primitive<'static>>();
    }
}
