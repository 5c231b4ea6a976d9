//! Filled triangle rasterization with per-sample edge tests.
//!
//! Coverage is decided in supersample space: each sample cell is tested at
//! its center against the three edge functions of the scaled triangle.
//! Samples exactly on an edge belong to the triangle only if that edge is a
//! top or left edge, so triangles sharing an edge never both claim a sample.

use crate::color::Color;
use crate::geometry::Point;
use crate::supersample::SupersampleBuffer;

/// Signed edge function `(p - a) × (b - a)`.
///
/// Zero on the line through `a` and `b`; the sign tells which side `p` is on.
///
/// # Example
///
/// ```
/// use trueno_raster::geometry::Point;
/// use trueno_raster::render::edge_function;
///
/// let (a, b) = (Point::new(0.0, 0.0), Point::new(4.0, 0.0));
/// assert!(edge_function(a, b, Point::new(1.0, 1.0)) < 0.0);
/// assert!(edge_function(a, b, Point::new(1.0, -1.0)) > 0.0);
/// assert_eq!(edge_function(a, b, Point::new(2.0, 0.0)), 0.0);
/// ```
#[inline]
#[must_use]
pub fn edge_function(a: Point, b: Point, p: Point) -> f32 {
    (p - a).cross(b - a)
}

/// One directed edge of a triangle with its inclusion rule.
struct Edge {
    origin: Point,
    direction: Point,
    top_left: bool,
}

impl Edge {
    /// Edge from `a` to `b` of a triangle wound so its interior is negative.
    fn new(a: Point, b: Point) -> Self {
        let direction = b - a;
        // With y pointing down and this winding, top edges run in +x and
        // left edges run in -y.
        let top_left = (direction.y == 0.0 && direction.x > 0.0) || direction.y < 0.0;
        Self {
            origin: a,
            direction,
            top_left,
        }
    }

    #[inline]
    fn covers(&self, p: Point) -> bool {
        let e = (p - self.origin).cross(self.direction);
        e < 0.0 || (e == 0.0 && self.top_left)
    }
}

/// Fill a triangle given in output-pixel coordinates.
///
/// Either winding is accepted. Zero-area triangles, and triangles whose
/// bounding box lies entirely outside the target, produce no writes.
pub fn rasterize_triangle(
    target: &mut SupersampleBuffer,
    v0: Point,
    v1: Point,
    v2: Point,
    color: Color,
) {
    let (w, h) = (target.width() as f32, target.height() as f32);
    let xs = [v0.x, v1.x, v2.x];
    let ys = [v0.y, v1.y, v2.y];
    if xs.iter().all(|&x| x < 0.0)
        || ys.iter().all(|&y| y < 0.0)
        || xs.iter().all(|&x| x >= w)
        || ys.iter().all(|&y| y >= h)
    {
        return;
    }

    let rate = target.sample_rate() as f32;
    let a = v0.scale(rate);
    let (mut b, mut c) = (v1.scale(rate), v2.scale(rate));

    let area = edge_function(a, b, c);
    if !area.is_finite() || area.abs() <= f32::EPSILON {
        return;
    }
    if area > 0.0 {
        std::mem::swap(&mut b, &mut c);
    }
    let edges = [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)];

    let (min_x, max_x) = (a.x.min(b.x).min(c.x), a.x.max(b.x).max(c.x));
    let (min_y, max_y) = (a.y.min(b.y).min(c.y), a.y.max(b.y).max(c.y));
    let x0 = min_x.floor().max(0.0) as i32;
    let x1 = max_x.ceil().min(target.super_width() as f32) as i32;
    let y0 = min_y.floor().max(0.0) as i32;
    let y1 = max_y.ceil().min(target.super_height() as f32) as i32;

    for sy in y0..y1 {
        let py = sy as f32 + 0.5;
        for sx in x0..x1 {
            let p = Point::new(sx as f32 + 0.5, py);
            if edges.iter().all(|edge| edge.covers(p)) {
                target.blend(sx, sy, color);
            }
        }
    }
}
