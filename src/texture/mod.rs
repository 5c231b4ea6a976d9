//! Mipmapped textures and filtered sampling.
//!
//! A [`Texture`] is an ordered chain of [`MipLevel`]s. Level 0 holds the
//! caller-supplied image; [`Texture::generate_mips`] fills in the
//! successively half-resolution levels. Sampling comes in three flavours:
//!
//! - **Nearest**: the single closest texel of one level
//! - **Bilinear**: 2×2 texel interpolation within one level
//! - **Trilinear**: bilinear samples of the two levels bracketing a
//!   continuous level of detail, interpolated
//!
//! Texel centers sit at half-integer coordinates: `u = 0` is the left edge of
//! texel 0, `u = 1` the right edge of the last texel. Lookups outside the
//! level clamp to the edge texels.
//!
//! # References
//!
//! - Williams, L. (1983). "Pyramidal Parametrics." SIGGRAPH '83.

mod mipmap;
mod sampler;

use crate::color::{Color, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::{mean_rgba, BYTES_PER_PIXEL};

/// Upper bound on the number of levels in a mip chain, level 0 included.
///
/// Enough for a 8192×8192 base image.
pub const MAX_MIP_LEVELS: usize = 14;

/// Texture filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Filter {
    /// Nearest texel of level 0.
    Nearest,
    /// Bilinear interpolation within level 0.
    Bilinear,
    /// Bilinear samples of two adjacent levels, interpolated by level of detail.
    #[default]
    Trilinear,
}

/// One level of a mip chain: `width × height` RGBA texels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevel {
    width: u32,
    height: u32,
    texels: Vec<u8>,
}

impl MipLevel {
    /// Create a level from raw RGBA texels.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or `texels` is not exactly
    /// `4 * width * height` bytes.
    pub fn new(width: u32, height: u32, texels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
        if texels.len() != expected {
            return Err(Error::TexelDataMismatch {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Width in texels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA texel data.
    #[must_use]
    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// Texel at `(x, y)`, or `None` if out of bounds.
    #[must_use]
    pub fn texel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.texel_index(x, y);
        Some(Rgba::from_array([
            self.texels[idx],
            self.texels[idx + 1],
            self.texels[idx + 2],
            self.texels[idx + 3],
        ]))
    }

    /// Texel at `(x, y)` with clamp-to-edge addressing.
    #[inline]
    pub(crate) fn texel_clamped(&self, x: i64, y: i64) -> Color {
        let x = x.clamp(0, i64::from(self.width) - 1) as u32;
        let y = y.clamp(0, i64::from(self.height) - 1) as u32;
        let idx = self.texel_index(x, y);
        Color::from_rgba8(Rgba::from_array([
            self.texels[idx],
            self.texels[idx + 1],
            self.texels[idx + 2],
            self.texels[idx + 3],
        ]))
    }

    /// Mean texel color, normalized to `[0, 1]`.
    #[must_use]
    pub fn mean_color(&self) -> Color {
        mean_rgba(&self.texels)
    }

    #[inline]
    fn texel_index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL
    }
}

/// A texture: a mip chain whose level 0 is the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    mipmap: Vec<MipLevel>,
}

impl Texture {
    /// Create an unmipped texture from level-0 RGBA texels (row-major).
    ///
    /// Call [`Texture::generate_mips`] before trilinear sampling.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or the texel count does not
    /// match.
    pub fn from_rgba(width: u32, height: u32, texels: Vec<u8>) -> Result<Self> {
        Ok(Self {
            mipmap: vec![MipLevel::new(width, height, texels)?],
        })
    }

    /// Create an unmipped texture filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgba) -> Result<Self> {
        let count = (width as usize) * (height as usize);
        let texels = color.to_array().repeat(count);
        Self::from_rgba(width, height, texels)
    }

    /// Create an unmipped checkerboard texture with square cells of `cell`
    /// texels, starting with `even` in the top-left corner.
    pub fn checkerboard(width: u32, height: u32, cell: u32, even: Rgba, odd: Rgba) -> Result<Self> {
        let cell = cell.max(1);
        let mut texels = Vec::with_capacity((width as usize) * (height as usize) * BYTES_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                let color = if (x / cell + y / cell) % 2 == 0 { even } else { odd };
                texels.extend_from_slice(&color.to_array());
            }
        }
        Self::from_rgba(width, height, texels)
    }

    /// Width of level 0.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.mipmap[0].width
    }

    /// Height of level 0.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.mipmap[0].height
    }

    /// Number of levels in the chain (at least 1).
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.mipmap.len()
    }

    /// Level `index`, or `None` if outside the chain.
    #[must_use]
    pub fn level(&self, index: usize) -> Option<&MipLevel> {
        self.mipmap.get(index)
    }

    /// All levels, finest first.
    #[must_use]
    pub fn levels(&self) -> &[MipLevel] {
        &self.mipmap
    }

    /// Whether the chain reaches as far down as mip generation would take it.
    #[must_use]
    pub fn is_mipmapped(&self) -> bool {
        self.mipmap.len() >= full_chain_len(self.width(), self.height())
    }
}

/// Levels in a complete chain for a `width × height` base, level 0 included.
fn full_chain_len(width: u32, height: u32) -> usize {
    let sub_levels = width.max(height).max(1).ilog2() as usize;
    (sub_levels + 1).min(MAX_MIP_LEVELS)
}
