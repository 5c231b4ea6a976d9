//! Nearest, bilinear and trilinear texture lookups.

use super::{Filter, MipLevel, Texture};
use crate::color::Color;

impl Texture {
    /// Sample with the given filter.
    ///
    /// `u_scale` and `v_scale` are the sample footprint in normalized texture
    /// coordinates; only [`Filter::Trilinear`] uses them. The other filters
    /// read level 0.
    #[must_use]
    pub fn sample(&self, filter: Filter, u: f32, v: f32, u_scale: f32, v_scale: f32) -> Color {
        match filter {
            Filter::Nearest => self.sample_nearest(u, v, 0),
            Filter::Bilinear => self.sample_bilinear(u, v, 0),
            Filter::Trilinear => self.sample_trilinear(u, v, u_scale, v_scale),
        }
    }

    /// Color of the texel nearest to `(u, v)` on `level`.
    ///
    /// `(u, v)` maps to texel space as `(width * u - 0.5, height * v - 0.5)`
    /// and rounds to the nearest texel, ties rounding up. Returns
    /// [`Color::INVALID_SAMPLE`] if `level` is outside the mip chain.
    #[must_use]
    pub fn sample_nearest(&self, u: f32, v: f32, level: usize) -> Color {
        let Some(mip) = self.level(level) else {
            return Color::INVALID_SAMPLE;
        };

        let (x, y) = texel_space(mip, u, v);
        mip.texel_clamped((x + 0.5).floor() as i64, (y + 0.5).floor() as i64)
    }

    /// Bilinearly filtered color at `(u, v)` on `level`.
    ///
    /// Interpolates the four texels around the sample point, horizontally
    /// then vertically, with clamp-to-edge addressing. Returns
    /// [`Color::INVALID_SAMPLE`] if `level` is outside the mip chain.
    #[must_use]
    pub fn sample_bilinear(&self, u: f32, v: f32, level: usize) -> Color {
        let Some(mip) = self.level(level) else {
            return Color::INVALID_SAMPLE;
        };
        bilinear(mip, u, v)
    }

    /// Trilinearly filtered color at `(u, v)` for a sample footprint of
    /// `u_scale × v_scale` in normalized texture coordinates.
    ///
    /// The level of detail is `d = log2(max(u_scale * width, v_scale * height))`
    /// on level 0. `d <= 0` samples level 0, `d` at or past the coarsest level
    /// samples that level, and anything in between interpolates the bilinear
    /// samples of `floor(d)` and `floor(d) + 1` by `d - floor(d)`.
    ///
    /// On an unmipped texture this degrades to bilinear sampling of level 0.
    #[must_use]
    pub fn sample_trilinear(&self, u: f32, v: f32, u_scale: f32, v_scale: f32) -> Color {
        let d = self.level_of_detail(u_scale, v_scale);
        let coarsest = self.level_count() - 1;

        // A zero footprint gives -inf, a NaN one gives NaN.
        if d.is_nan() || d <= 0.0 {
            return bilinear(&self.mipmap[0], u, v);
        }
        if d >= coarsest as f32 {
            return bilinear(&self.mipmap[coarsest], u, v);
        }

        let lower = d.floor();
        let fine = lower as usize;
        let near = bilinear(&self.mipmap[fine], u, v);
        let far = bilinear(&self.mipmap[fine + 1], u, v);
        near.lerp(far, d - lower)
    }

    /// Continuous level of detail for a footprint of `u_scale × v_scale`.
    ///
    /// This is log2 of the number of level-0 texels the footprint spans along
    /// its longer axis.
    #[must_use]
    pub fn level_of_detail(&self, u_scale: f32, v_scale: f32) -> f32 {
        let du = u_scale.abs() * self.width() as f32;
        let dv = v_scale.abs() * self.height() as f32;
        du.max(dv).log2()
    }
}

/// Map normalized coordinates to continuous texel space (centers at integers).
#[inline]
fn texel_space(mip: &MipLevel, u: f32, v: f32) -> (f32, f32) {
    (
        mip.width() as f32 * u - 0.5,
        mip.height() as f32 * v - 0.5,
    )
}

fn bilinear(mip: &MipLevel, u: f32, v: f32) -> Color {
    let (x, y) = texel_space(mip, u, v);
    let x0 = x.floor();
    let y0 = y.floor();
    let tx = x - x0;
    let ty = y - y0;
    let (ix, iy) = (x0 as i64, y0 as i64);

    let top = mip
        .texel_clamped(ix, iy)
        .lerp(mip.texel_clamped(ix + 1, iy), tx);
    let bottom = mip
        .texel_clamped(ix, iy + 1)
        .lerp(mip.texel_clamped(ix + 1, iy + 1), tx);
    top.lerp(bottom, ty)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::color::Rgba;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Sampling never panics and stays in range for any coordinates.
        #[test]
        fn prop_samples_in_unit_range(
            u in -2.0f32..3.0,
            v in -2.0f32..3.0,
            scale in 0.0f32..4.0,
            level in 0usize..8
        ) {
            let mut tex = Texture::checkerboard(13, 7, 2, Rgba::RED, Rgba::new(0, 40, 255, 10)).unwrap();
            tex.generate_mips(0).unwrap();

            for c in [
                tex.sample_nearest(u, v, level),
                tex.sample_bilinear(u, v, level),
                tex.sample_trilinear(u, v, scale, scale),
            ] {
                for channel in [c.r, c.g, c.b, c.a] {
                    prop_assert!((-1e-6..=1.0 + 1e-6).contains(&channel), "channel {}", channel);
                }
            }
        }
    }
}
