//! Textured quad rasterization.

use crate::geometry::Point;
use crate::supersample::SupersampleBuffer;
use crate::texture::{Filter, Texture};

/// Draw `texture` stretched over the axis-aligned rectangle spanned by two
/// opposite corners, in output-pixel coordinates.
///
/// Every sample cell whose center lies inside the rectangle gets one texture
/// lookup. Texture coordinates run linearly from `(0, 0)` at the top-left of
/// the rectangle to `(1, 1)` at the bottom-right; the sample footprint passed
/// to the sampler is one cell, i.e. the reciprocal of the rectangle's extent
/// in samples. A rectangle with zero width or height draws nothing.
pub fn rasterize_image(
    target: &mut SupersampleBuffer,
    corner: Point,
    opposite: Point,
    texture: &Texture,
    filter: Filter,
) {
    let rate = target.sample_rate() as f32;
    let (x_min, x_max) = (corner.x.min(opposite.x) * rate, corner.x.max(opposite.x) * rate);
    let (y_min, y_max) = (corner.y.min(opposite.y) * rate, corner.y.max(opposite.y) * rate);

    let (extent_x, extent_y) = (x_max - x_min, y_max - y_min);
    if !extent_x.is_finite() || !extent_y.is_finite() || extent_x <= 0.0 || extent_y <= 0.0 {
        return;
    }
    let u_scale = 1.0 / extent_x;
    let v_scale = 1.0 / extent_y;

    let x0 = x_min.floor().max(0.0) as i32;
    let x1 = x_max.ceil().min(target.super_width() as f32) as i32;
    let y0 = y_min.floor().max(0.0) as i32;
    let y1 = y_max.ceil().min(target.super_height() as f32) as i32;

    for sy in y0..y1 {
        let cy = sy as f32 + 0.5;
        if cy < y_min || cy >= y_max {
            continue;
        }
        let v = (cy - y_min) * v_scale;
        for sx in x0..x1 {
            let cx = sx as f32 + 0.5;
            if cx < x_min || cx >= x_max {
                continue;
            }
            let u = (cx - x_min) * u_scale;
            let color = texture.sample(filter, u, v, u_scale, v_scale);
            target.blend(sx, sy, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, Rgba};
    use crate::framebuffer::Framebuffer;

    fn gradient_texture() -> Texture {
        let mut texels = Vec::new();
        for y in 0..4u8 {
            for x in 0..4u8 {
                texels.extend_from_slice(&[x * 60, y * 60, 100, 255]);
            }
        }
        Texture::from_rgba(4, 4, texels).unwrap()
    }

    #[test]
    fn test_one_texel_per_pixel_reproduces_texture() {
        let mut tex = gradient_texture();
        tex.generate_mips(0).unwrap();

        for filter in [Filter::Nearest, Filter::Bilinear, Filter::Trilinear] {
            let mut target = SupersampleBuffer::new(4, 4, 1).unwrap();
            rasterize_image(&mut target, Point::new(0.0, 0.0), Point::new(4.0, 4.0), &tex, filter);

            let mut out = Framebuffer::new(4, 4).unwrap();
            target.resolve(&mut out).unwrap();
            let level = tex.level(0).unwrap();
            for y in 0..4 {
                for x in 0..4 {
                    assert_eq!(out.get_pixel(x, y), level.texel(x, y), "{filter:?} ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_corners_in_any_order() {
        let tex = gradient_texture();
        let mut forward = SupersampleBuffer::new(6, 6, 2).unwrap();
        let mut swapped = forward.clone();
        rasterize_image(
            &mut forward,
            Point::new(1.0, 1.0),
            Point::new(5.0, 5.0),
            &tex,
            Filter::Bilinear,
        );
        rasterize_image(
            &mut swapped,
            Point::new(5.0, 1.0),
            Point::new(1.0, 5.0),
            &tex,
            Filter::Bilinear,
        );
        assert_eq!(forward, swapped);
    }

    #[test]
    fn test_only_covered_cells_are_written() {
        let tex = Texture::solid(2, 2, Rgba::BLACK).unwrap();
        let mut target = SupersampleBuffer::new(8, 8, 1).unwrap();
        rasterize_image(
            &mut target,
            Point::new(2.0, 3.0),
            Point::new(5.0, 4.0),
            &tex,
            Filter::Nearest,
        );
        for sy in 0..8 {
            for sx in 0..8 {
                let inside = (2..5).contains(&sx) && sy == 3;
                let expected = if inside { Color::BLACK } else { Color::WHITE };
                assert_eq!(target.sample(sx, sy), Some(expected), "cell ({sx}, {sy})");
            }
        }
    }

    #[test]
    fn test_zero_size_quad_is_noop() {
        let tex = Texture::solid(2, 2, Rgba::BLACK).unwrap();
        let mut target = SupersampleBuffer::new(4, 4, 2).unwrap();
        let before = target.clone();
        rasterize_image(
            &mut target,
            Point::new(1.0, 1.0),
            Point::new(1.0, 3.0),
            &tex,
            Filter::Trilinear,
        );
        rasterize_image(
            &mut target,
            Point::new(1.0, 2.0),
            Point::new(3.0, 2.0),
            &tex,
            Filter::Trilinear,
        );
        assert_eq!(target, before);
    }

    #[test]
    fn test_minified_checkerboard_averages_out() {
        let mut tex = Texture::checkerboard(16, 16, 1, Rgba::BLACK, Rgba::WHITE).unwrap();
        tex.generate_mips(0).unwrap();

        let mut target = SupersampleBuffer::new(4, 4, 1).unwrap();
        rasterize_image(
            &mut target,
            Point::new(0.0, 0.0),
            Point::new(4.0, 4.0),
            &tex,
            Filter::Trilinear,
        );
        let mut out = Framebuffer::new(4, 4).unwrap();
        target.resolve(&mut out).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.get_pixel(x, y), Some(Rgba::rgb(128, 128, 128)));
            }
        }
    }

    #[test]
    fn test_offscreen_quad_is_clipped() {
        let tex = Texture::solid(2, 2, Rgba::BLACK).unwrap();
        let mut target = SupersampleBuffer::new(4, 4, 1).unwrap();
        rasterize_image(
            &mut target,
            Point::new(-1e6, -1e6),
            Point::new(1e6, 1e6),
            &tex,
            Filter::Bilinear,
        );
        assert!(target.samples().iter().all(|&c| c == Color::BLACK));
    }
}
