//! Mip chain generation by 2×2 box filtering.

use super::{MipLevel, Texture, MAX_MIP_LEVELS};
use crate::error::{Error, Result};
use crate::framebuffer::BYTES_PER_PIXEL;

impl Texture {
    /// Rebuild every level below `start_level` from `start_level` itself.
    ///
    /// The number of generated levels is `floor(log2(max(w, h)))` of the start
    /// level, capped so the chain never exceeds [`MAX_MIP_LEVELS`]. Each level
    /// halves the previous one per axis (rounding down, minimum 1), so odd
    /// sizes converge to 1×1 without staying powers of two: 17 → 8 → 4 → 2 → 1.
    /// Existing levels past `start_level` are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMipLevel`] if `start_level` is outside the chain.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_raster::color::Rgba;
    /// use trueno_raster::texture::Texture;
    ///
    /// let mut tex = Texture::solid(17, 17, Rgba::RED).unwrap();
    /// tex.generate_mips(0).unwrap();
    /// let widths: Vec<u32> = tex.levels().iter().map(|l| l.width()).collect();
    /// assert_eq!(widths, vec![17, 8, 4, 2, 1]);
    /// ```
    pub fn generate_mips(&mut self, start_level: usize) -> Result<()> {
        let Some(base) = self.mipmap.get(start_level) else {
            return Err(Error::InvalidMipLevel {
                level: start_level,
                levels: self.mipmap.len(),
            });
        };

        let sub_levels = base.width.max(base.height).ilog2() as usize;
        let sub_levels = sub_levels.min(MAX_MIP_LEVELS.saturating_sub(start_level + 1));

        self.mipmap.truncate(start_level + 1);
        self.mipmap.reserve(sub_levels);
        for _ in 0..sub_levels {
            let next = match self.mipmap.last() {
                Some(level) => downsample(level),
                None => break,
            };
            self.mipmap.push(next);
        }

        log::debug!(
            "generated {} mip level(s) below level {} ({}x{})",
            sub_levels,
            start_level,
            self.mipmap[start_level].width,
            self.mipmap[start_level].height
        );
        Ok(())
    }
}

/// Halve a level per axis, averaging each 2×2 block of source texels.
///
/// Source coordinates past the edge clamp to the last row/column, so a
/// 1-texel-wide source averages each texel with itself horizontally.
fn downsample(src: &MipLevel) -> MipLevel {
    let width = (src.width / 2).max(1);
    let height = (src.height / 2).max(1);
    let max_x = src.width - 1;
    let max_y = src.height - 1;

    let mut texels = Vec::with_capacity((width as usize) * (height as usize) * BYTES_PER_PIXEL);
    for y in 0..height {
        let y0 = (2 * y).min(max_y);
        let y1 = (2 * y + 1).min(max_y);
        for x in 0..width {
            let x0 = (2 * x).min(max_x);
            let x1 = (2 * x + 1).min(max_x);

            let corners = [
                src.texel_index(x0, y0),
                src.texel_index(x1, y0),
                src.texel_index(x0, y1),
                src.texel_index(x1, y1),
            ];
            for channel in 0..BYTES_PER_PIXEL {
                let sum: u32 = corners
                    .iter()
                    .map(|&idx| u32::from(src.texels[idx + channel]))
                    .sum();
                // Round to nearest; the sum of four bytes fits easily.
                texels.push(((sum + 2) / 4) as u8);
            }
        }
    }

    MipLevel {
        width,
        height,
        texels,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Every level halves the previous one, rounding down, minimum 1.
        #[test]
        fn prop_levels_floor_halve(width in 1u32..300, height in 1u32..300) {
            let mut tex = Texture::from_rgba(
                width,
                height,
                vec![128; (width * height * 4) as usize],
            ).unwrap();
            tex.generate_mips(0).unwrap();

            for pair in tex.levels().windows(2) {
                prop_assert_eq!(pair[1].width(), (pair[0].width() / 2).max(1));
                prop_assert_eq!(pair[1].height(), (pair[0].height() / 2).max(1));
                prop_assert_eq!(
                    pair[1].texels().len(),
                    (pair[1].width() * pair[1].height() * 4) as usize
                );
            }
            let last = &tex.levels()[tex.level_count() - 1];
            prop_assert_eq!(last.width().max(last.height()), 1);
        }
    }
}
