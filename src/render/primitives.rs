//! Point and line rasterization.
//!
//! Both work in output-pixel space: a point or line pixel is splatted over
//! the full `sample_rate × sample_rate` block behind it, so their coverage
//! is decided at output resolution.

use crate::color::Color;
use crate::geometry::Point;
use crate::supersample::SupersampleBuffer;

/// Fill the output pixel containing `position` at full coverage.
///
/// Positions outside the target, or non-finite, are ignored.
pub fn rasterize_point(target: &mut SupersampleBuffer, position: Point, color: Color) {
    if !position.x.is_finite() || !position.y.is_finite() {
        return;
    }
    splat(target, position.x.floor() as i32, position.y.floor() as i32, color);
}

/// Draw an anti-aliased line using Wu's algorithm.
///
/// # Algorithm
///
/// Wu's algorithm draws two pixels at each step along the major axis,
/// weighting their coverage by the fractional distance from the ideal line
/// position. Endpoints are additionally weighted by how much of their pixel
/// the segment spans along the major axis.
///
/// A zero-length line draws a single point.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn rasterize_line(target: &mut SupersampleBuffer, from: Point, to: Point, color: Color) {
    let (x0, y0, x1, y1) = (from.x, from.y, to.x, to.y);
    if ![x0, y0, x1, y1].iter().all(|c| c.is_finite()) {
        return;
    }
    if x0 == x1 && y0 == y1 {
        rasterize_point(target, from, color);
        return;
    }

    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };

    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx == 0.0 { 1.0 } else { dy / dx };

    let major_extent = if steep { target.height() } else { target.width() };
    let major_extent = major_extent as i32;
    let mut plot_at = |major: i32, minor: i32, coverage: f32| {
        if steep {
            plot(target, minor, major, color, coverage);
        } else {
            plot(target, major, minor, color, coverage);
        }
    };

    // First endpoint
    let xend1 = x0.round();
    let yend = y0 + gradient * (xend1 - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend1 as i32;
    let ypxl1 = yend.floor() as i32;
    plot_at(xpxl1, ypxl1, rfpart(yend) * xgap);
    plot_at(xpxl1, ypxl1.saturating_add(1), fpart(yend) * xgap);
    let yend1 = yend;

    // Second endpoint
    let xend2 = x1.round();
    let yend = y1 + gradient * (xend2 - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend2 as i32;
    let ypxl2 = yend.floor() as i32;
    plot_at(xpxl2, ypxl2, rfpart(yend) * xgap);
    plot_at(xpxl2, ypxl2.saturating_add(1), fpart(yend) * xgap);

    // Interior, clipped to the target along the major axis
    let start = xpxl1.saturating_add(1).max(0);
    let end = xpxl2.min(major_extent);
    let mut intery = yend1 + gradient * (start as f32 - xend1);
    for x in start..end {
        let ipart = intery.floor() as i32;
        plot_at(x, ipart, rfpart(intery));
        plot_at(x, ipart.saturating_add(1), fpart(intery));
        intery += gradient;
    }
}

/// Draw consecutive segments through `points`, closing the loop when
/// `closed` is set.
///
/// A single point is drawn as a point; an empty slice draws nothing.
pub fn rasterize_polyline(
    target: &mut SupersampleBuffer,
    points: &[Point],
    closed: bool,
    color: Color,
) {
    match points {
        [] => {}
        [only] => rasterize_point(target, *only, color),
        _ => {
            for pair in points.windows(2) {
                rasterize_line(target, pair[0], pair[1], color);
            }
            if closed && points.len() > 2 {
                if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
                    rasterize_line(target, last, first, color);
                }
            }
        }
    }
}

/// Plot an output pixel with `color` weighted by its fractional coverage.
#[inline]
fn plot(target: &mut SupersampleBuffer, x: i32, y: i32, color: Color, coverage: f32) {
    if coverage > 0.0 {
        splat(target, x, y, color * coverage);
    }
}

/// Blend `color` into every sample of output pixel `(px, py)`.
#[inline]
fn splat(target: &mut SupersampleBuffer, px: i32, py: i32, color: Color) {
    if px < 0 || py < 0 || px as u32 >= target.width() || py as u32 >= target.height() {
        return;
    }
    // In bounds, so the scaled coordinates fit the i32 sample grid.
    let rate = target.sample_rate() as i32;
    for sy in py * rate..(py + 1) * rate {
        for sx in px * rate..(px + 1) * rate {
            target.blend(sx, sy, color);
        }
    }
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn black() -> Color {
        Color::BLACK
    }

    /// Output pixels (x, y) with at least one sample differing from white.
    fn touched(target: &SupersampleBuffer) -> Vec<(u32, u32)> {
        let rate = target.sample_rate();
        let mut out = Vec::new();
        for y in 0..target.height() {
            for x in 0..target.width() {
                let hit = (0..rate).any(|sy| {
                    (0..rate).any(|sx| {
                        target.sample((x * rate + sx) as i32, (y * rate + sy) as i32)
                            != Some(Color::WHITE)
                    })
                });
                if hit {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_point_fills_whole_block() {
        let mut target = SupersampleBuffer::new(4, 4, 3).unwrap();
        rasterize_point(&mut target, Point::new(1.7, 2.2), black());

        for sy in 0..12 {
            for sx in 0..12 {
                let inside = (3..6).contains(&sx) && (6..9).contains(&sy);
                let expected = if inside { Color::BLACK } else { Color::WHITE };
                assert_eq!(target.sample(sx, sy), Some(expected), "sample ({sx}, {sy})");
            }
        }
    }

    #[test]
    fn test_point_out_of_bounds() {
        let mut target = SupersampleBuffer::new(4, 4, 2).unwrap();
        let before = target.clone();
        rasterize_point(&mut target, Point::new(-0.5, 1.0), black());
        rasterize_point(&mut target, Point::new(4.0, 1.0), black());
        rasterize_point(&mut target, Point::new(1.0, f32::NAN), black());
        rasterize_point(&mut target, Point::new(1e30, 1e30), black());
        assert_eq!(target, before);
    }

    #[test]
    fn test_horizontal_line_single_row() {
        let mut target = SupersampleBuffer::new(16, 16, 2).unwrap();
        rasterize_line(&mut target, Point::new(2.0, 5.0), Point::new(10.0, 5.0), black());

        let pixels = touched(&target);
        assert!(!pixels.is_empty());
        assert!(pixels.iter().all(|&(_, y)| y == 5), "{pixels:?}");
        // Interior pixels are fully covered
        for x in 3..10 {
            assert_eq!(target.sample(x * 2, 10), Some(Color::BLACK));
            assert_eq!(target.sample(x * 2 + 1, 11), Some(Color::BLACK));
        }
    }

    #[test]
    fn test_vertical_line_single_column() {
        let mut target = SupersampleBuffer::new(16, 16, 1).unwrap();
        rasterize_line(&mut target, Point::new(7.0, 1.0), Point::new(7.0, 12.0), black());

        let pixels = touched(&target);
        assert!(pixels.iter().all(|&(x, _)| x == 7), "{pixels:?}");
        for y in 2..12 {
            assert_eq!(target.sample(7, y), Some(Color::BLACK));
        }
    }

    #[test]
    fn test_endpoint_coverage_is_partial() {
        let mut target = SupersampleBuffer::new(16, 4, 1).unwrap();
        rasterize_line(&mut target, Point::new(2.0, 1.0), Point::new(10.0, 1.0), black());

        // Endpoints span half their pixel along the line
        let end = target.sample(2, 1).unwrap();
        assert_abs_diff_eq!(end.r, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(end.a, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_partial_coverage_weights_whole_color() {
        let mut target = SupersampleBuffer::new(8, 4, 1).unwrap();
        let red = Color::rgb(1.0, 0.0, 0.0);
        rasterize_line(&mut target, Point::new(2.0, 1.0), Point::new(6.0, 1.0), red);

        // Endpoint blends red * 0.5 = (0.5, 0, 0, 0.5) over white
        let end = target.sample(2, 1).unwrap();
        assert_abs_diff_eq!(end.r, 0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(end.g, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(end.b, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(end.a, 1.0, epsilon = 1e-6);

        // Interior pixels are fully covered
        assert_eq!(target.sample(4, 1), Some(red));
    }

    #[test]
    fn test_line_direction_is_irrelevant() {
        let mut forward = SupersampleBuffer::new(20, 20, 2).unwrap();
        let mut backward = forward.clone();
        let (a, b) = (Point::new(1.25, 3.5), Point::new(17.5, 11.75));
        rasterize_line(&mut forward, a, b, black());
        rasterize_line(&mut backward, b, a, black());
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_diagonal_line_straddles_rows() {
        let mut target = SupersampleBuffer::new(10, 10, 1).unwrap();
        rasterize_line(&mut target, Point::new(0.0, 0.0), Point::new(9.0, 4.5), black());

        // Every interior column is touched, at most two rows each
        let pixels = touched(&target);
        for x in 1..9 {
            let rows = pixels.iter().filter(|&&(px, _)| px == x).count();
            assert!((1..=2).contains(&rows), "column {x} has {rows} pixels");
        }
    }

    #[test]
    fn test_zero_length_line_is_point() {
        let mut line = SupersampleBuffer::new(4, 4, 2).unwrap();
        let mut point = line.clone();
        rasterize_line(&mut line, Point::new(1.5, 2.5), Point::new(1.5, 2.5), black());
        rasterize_point(&mut point, Point::new(1.5, 2.5), black());
        assert_eq!(line, point);
    }

    #[test]
    fn test_line_is_clipped() {
        let mut target = SupersampleBuffer::new(8, 8, 1).unwrap();
        rasterize_line(&mut target, Point::new(-1e9, 4.0), Point::new(1e9, 4.0), black());

        let pixels = touched(&target);
        assert_eq!(pixels.len(), 8);
        assert!(pixels.iter().all(|&(_, y)| y == 4));
    }

    #[test]
    fn test_polyline_closed_adds_segment() {
        let square = [
            Point::new(1.0, 1.0),
            Point::new(6.0, 1.0),
            Point::new(6.0, 6.0),
            Point::new(1.0, 6.0),
        ];
        let mut open = SupersampleBuffer::new(8, 8, 1).unwrap();
        let mut closed = open.clone();
        rasterize_polyline(&mut open, &square, false, black());
        rasterize_polyline(&mut closed, &square, true, black());

        // The closing edge runs down column 1
        assert_eq!(open.sample(1, 3), Some(Color::WHITE));
        assert_eq!(closed.sample(1, 3), Some(Color::BLACK));
    }

    #[test]
    fn test_polyline_degenerate_inputs() {
        let mut target = SupersampleBuffer::new(4, 4, 1).unwrap();
        let before = target.clone();
        rasterize_polyline(&mut target, &[], true, black());
        assert_eq!(target, before);

        rasterize_polyline(&mut target, &[Point::new(2.0, 2.0)], true, black());
        assert_eq!(target.sample(2, 2), Some(Color::BLACK));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Arbitrary lines never panic and never write outside the grid.
        #[test]
        fn prop_line_stays_in_bounds(
            x0 in -50.0f32..50.0,
            y0 in -50.0f32..50.0,
            x1 in -50.0f32..50.0,
            y1 in -50.0f32..50.0,
            rate in 1u32..4
        ) {
            let mut target = SupersampleBuffer::new(16, 12, rate).unwrap();
            rasterize_line(&mut target, Point::new(x0, y0), Point::new(x1, y1), Color::BLACK);
            prop_assert_eq!(target.samples().len(), (16 * rate * 12 * rate) as usize);
        }

        /// Axis-aligned lines at integer coordinates touch a single row.
        #[test]
        fn prop_horizontal_line_one_row(y in 0u32..12, x0 in 0u32..8, len in 1u32..8) {
            let mut target = SupersampleBuffer::new(16, 12, 1).unwrap();
            let (fy, fx0) = (y as f32, x0 as f32);
            rasterize_line(
                &mut target,
                Point::new(fx0, fy),
                Point::new(fx0 + len as f32, fy),
                Color::BLACK,
            );
            for sy in 0..12 {
                for sx in 0..16 {
                    if sy != y as i32 {
                        prop_assert_eq!(target.sample(sx, sy), Some(Color::WHITE));
                    }
                }
            }
        }
    }
}
