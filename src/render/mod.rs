//! Rasterization of device-space primitives into a supersample buffer.
//!
//! # Algorithms
//!
//! - **Point splat**: one full output pixel, replicated over its sample block
//! - **Wu's Anti-aliased Line**: coverage computed at output resolution
//! - **Edge-function Triangle**: coverage tested per sample, top-left rule
//! - **Textured Quad**: per-sample texture lookup with footprint-driven LOD
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Pineda, J. (1988). "A Parallel Algorithm for Polygon Rasterization." SIGGRAPH '88.

mod image;
mod primitives;
mod triangle;

pub use image::rasterize_image;
pub use primitives::{rasterize_line, rasterize_point, rasterize_polyline};
pub use triangle::{edge_function, rasterize_triangle};

use crate::color::Color;
use crate::geometry::Point;
use crate::supersample::SupersampleBuffer;
use crate::texture::{Filter, Texture};

/// A primitive in device space, as handed over by a scene walker.
///
/// Transforms have already been applied; the rasterizer never transforms
/// geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    /// One output pixel at full coverage.
    Point {
        /// Any position inside the pixel.
        position: Point,
        /// Fill color.
        color: Color,
    },
    /// Anti-aliased, one pixel wide line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        color: Color,
    },
    /// Connected line segments.
    Polyline {
        /// Vertices in drawing order.
        points: &'a [Point],
        /// Stroke color.
        color: Color,
        /// Also connect the last point back to the first.
        closed: bool,
    },
    /// Filled triangle, either winding.
    Triangle {
        /// The three corners.
        vertices: [Point; 3],
        /// Fill color.
        color: Color,
    },
    /// Axis-aligned image between two opposite corners.
    TexturedQuad {
        /// Corner mapped to texture coordinate (0, 0).
        min: Point,
        /// Corner mapped to texture coordinate (1, 1).
        max: Point,
        /// Image to draw; mip levels should already be generated.
        texture: &'a Texture,
    },
}

impl<'a> Primitive<'a> {
    /// A point primitive.
    #[must_use]
    pub fn point(x: f32, y: f32, color: impl Into<Color>) -> Self {
        Self::Point {
            position: Point::new(x, y),
            color: color.into(),
        }
    }

    /// A line primitive.
    #[must_use]
    pub fn line(x0: f32, y0: f32, x1: f32, y1: f32, color: impl Into<Color>) -> Self {
        Self::Line {
            from: Point::new(x0, y0),
            to: Point::new(x1, y1),
            color: color.into(),
        }
    }

    /// A triangle primitive.
    #[must_use]
    pub fn triangle(v0: Point, v1: Point, v2: Point, color: impl Into<Color>) -> Self {
        Self::Triangle {
            vertices: [v0, v1, v2],
            color: color.into(),
        }
    }

    /// A textured quad primitive.
    #[must_use]
    pub fn textured_quad(min: Point, max: Point, texture: &'a Texture) -> Self {
        Self::TexturedQuad { min, max, texture }
    }

    /// Rasterize into `target`, using `filter` for textured quads.
    pub fn rasterize(&self, target: &mut SupersampleBuffer, filter: Filter) {
        match *self {
            Self::Point { position, color } => rasterize_point(target, position, color),
            Self::Line { from, to, color } => rasterize_line(target, from, to, color),
            Self::Polyline {
                points,
                color,
                closed,
            } => rasterize_polyline(target, points, closed, color),
            Self::Triangle { vertices, color } => {
                rasterize_triangle(target, vertices[0], vertices[1], vertices[2], color);
            }
            Self::TexturedQuad { min, max, texture } => {
                rasterize_image(target, min, max, texture, filter);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn test_constructors_convert_colors() {
        let p = Primitive::point(1.0, 2.0, Rgba::RED);
        assert_eq!(
            p,
            Primitive::Point {
                position: Point::new(1.0, 2.0),
                color: Color::rgb(1.0, 0.0, 0.0),
            }
        );
    }

    #[test]
    fn test_dispatch_writes_samples() {
        let tex = Texture::solid(2, 2, Rgba::BLUE).unwrap();
        let points = [Point::new(0.5, 3.5), Point::new(3.5, 3.5)];
        let primitives = [
            Primitive::point(0.5, 0.5, Rgba::BLACK),
            Primitive::line(0.0, 1.0, 4.0, 1.0, Rgba::BLACK),
            Primitive::Polyline {
                points: &points,
                color: Color::BLACK,
                closed: false,
            },
            Primitive::triangle(
                Point::new(0.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(0.0, 3.0),
                Rgba::BLACK,
            ),
            Primitive::textured_quad(Point::new(3.0, 0.0), Point::new(4.0, 1.0), &tex),
        ];

        for primitive in &primitives {
            let mut target = SupersampleBuffer::new(4, 4, 1).unwrap();
            let before = target.clone();
            primitive.rasterize(&mut target, Filter::Trilinear);
            assert_ne!(target, before, "{primitive:?} wrote nothing");
        }
    }
}
