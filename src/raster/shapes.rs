use serde::{Deserialize, Serialize};

use crate::color::{Color, Rgba, composite};
use crate::geometry::{PixelBox, Point, distance_to_segment};
use crate::pixel_buffer::PixelBuffer;

use super::shade_area;

/// The drag-to-draw shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Ellipse,
}

/// Outline or solid rendering for rectangles and ellipses. Lines ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FillMode {
    #[default]
    Stroke,
    Filled,
}

/// Everything a shape draw needs besides its two corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub color: Color,
    /// Stroke width in pixels
    pub size: u32,
    /// Global compositing alpha
    pub opacity: f32,
    pub fill: FillMode,
}

/// Draw `kind` spanned by `start` and `end`.
///
/// Previews and commits go through this same call, so the preview a user
/// sees is exactly what gets committed.
pub fn draw_shape(
    buffer: &mut PixelBuffer,
    kind: ShapeKind,
    start: Point,
    end: Point,
    style: &ShapeStyle,
) {
    let ShapeStyle { color, size, opacity, fill } = *style;
    match kind {
        ShapeKind::Line => draw_line(buffer, start, end, color, size as f32, opacity),
        ShapeKind::Rectangle => draw_rect(buffer, start, end, color, size, opacity, fill),
        ShapeKind::Ellipse => draw_ellipse(buffer, start, end, color, size, opacity, fill),
    }
}

/// Round-capped segment of width `width`.
pub fn draw_line(
    buffer: &mut PixelBuffer,
    from: Point,
    to: Point,
    color: Color,
    width: f32,
    alpha: f32,
) {
    stroke_capsule(buffer, from, to, width, |dst| composite(dst, color, alpha));
}

/// Axis-aligned rectangle between two opposite corners, any drag direction.
///
/// The outline runs through both corners. A stroke of size `s` covers `s`
/// pixels across each edge: `s / 2` before the outline and `(s - 1) / 2`
/// after it, so odd sizes are centered and even sizes lean toward the origin.
pub fn draw_rect(
    buffer: &mut PixelBuffer,
    a: Point,
    b: Point,
    color: Color,
    size: u32,
    alpha: f32,
    fill: FillMode,
) {
    let rect = PixelBox::from_corners(a, b);
    match fill {
        FillMode::Filled => {
            shade_area(buffer, rect, |_, _, dst| Some(composite(dst, color, alpha)));
        }
        FillMode::Stroke => {
            let size = size.max(1) as i64;
            let before = size / 2;
            let after = (size - 1) / 2;
            let outer = PixelBox {
                min_x: rect.min_x - before,
                min_y: rect.min_y - before,
                max_x: rect.max_x + after,
                max_y: rect.max_y + after,
            };
            let inner = PixelBox {
                min_x: rect.min_x + after + 1,
                min_y: rect.min_y + after + 1,
                max_x: rect.max_x - before - 1,
                max_y: rect.max_y - before - 1,
            };
            shade_area(buffer, outer, |x, y, dst| {
                (!inner.contains(x, y)).then(|| composite(dst, color, alpha))
            });
        }
    }
}

/// Ellipse inscribed in the box spanned by `a` and `b`.
pub fn draw_ellipse(
    buffer: &mut PixelBuffer,
    a: Point,
    b: Point,
    color: Color,
    size: u32,
    alpha: f32,
    fill: FillMode,
) {
    let cx = (a.x + b.x) as f32 / 2.0;
    let cy = (a.y + b.y) as f32 / 2.0;
    let rx = (b.x - a.x).abs() as f32 / 2.0;
    let ry = (b.y - a.y).abs() as f32 / 2.0;

    // A flat ellipse has no interior; its outline is the segment itself.
    if rx == 0.0 || ry == 0.0 {
        if fill == FillMode::Stroke {
            draw_line(buffer, a, b, color, size as f32, alpha);
        }
        return;
    }

    let band = StrokeBand::new(size as f32);
    let area = PixelBox::from_corners(a, b).expand(band.reach());

    shade_area(buffer, area, |x, y, dst| {
        let covered = match fill {
            FillMode::Filled => {
                let u = (x as f32 - cx) / rx;
                let v = (y as f32 - cy) / ry;
                u * u + v * v <= 1.0
            }
            FillMode::Stroke => {
                let (px, py) = band.sample(x, y);
                let (dx, dy) = (px - cx, py - cy);
                let level = (dx / rx).powi(2) + (dy / ry).powi(2) - 1.0;
                // First-order distance to the outline: |f| / |grad f|.
                let gx = 2.0 * dx / (rx * rx);
                let gy = 2.0 * dy / (ry * ry);
                let grad = (gx * gx + gy * gy).sqrt();
                let distance = if grad > 0.0 { level.abs() / grad } else { rx.min(ry) };
                distance < band.radius
            }
        };
        covered.then(|| composite(dst, color, alpha))
    });
}

/// Footprint of a hard-edged stroke.
///
/// The width is rounded to whole pixels. Pixels are tested at their index
/// for odd widths and half a pixel further along for even widths, so a
/// stroke of width `n` covers exactly `n` pixels across.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StrokeBand {
    radius: f32,
    offset: f32,
}

impl StrokeBand {
    pub(crate) fn new(width: f32) -> Self {
        let pixels = width.round().max(1.0);
        let offset = if pixels % 2.0 == 0.0 { 0.5 } else { 0.0 };
        Self {
            radius: pixels / 2.0,
            offset,
        }
    }

    fn sample(&self, x: i64, y: i64) -> (f32, f32) {
        (x as f32 + self.offset, y as f32 + self.offset)
    }

    /// How far the footprint can extend past the centerline, in pixels.
    fn reach(&self) -> i64 {
        self.radius.ceil() as i64 + 1
    }
}

/// Shade every pixel the stroke band of the segment covers with `paint`.
pub(crate) fn stroke_capsule(
    buffer: &mut PixelBuffer,
    from: Point,
    to: Point,
    width: f32,
    paint: impl Fn(Rgba) -> Rgba,
) {
    let band = StrokeBand::new(width);
    let area = PixelBox::from_corners(from, to).expand(band.reach());
    shade_area(buffer, area, |x, y, dst| {
        let (px, py) = band.sample(x, y);
        (distance_to_segment(px, py, from, to) < band.radius).then(|| paint(dst))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba = image::Rgba([255, 255, 255, 255]);
    const BLACK: Rgba = image::Rgba([0, 0, 0, 255]);

    fn style(size: u32, fill: FillMode) -> ShapeStyle {
        ShapeStyle { color: Color::BLACK, size, opacity: 1.0, fill }
    }

    fn black_pixels(buffer: &PixelBuffer) -> Vec<(i64, i64)> {
        let mut out = Vec::new();
        for y in 0..buffer.height() as i64 {
            for x in 0..buffer.width() as i64 {
                if buffer.get_pixel(x, y).unwrap() == BLACK {
                    out.push((x, y));
                }
            }
        }
        out
    }

    fn count_black(buffer: &PixelBuffer, pixels: impl Iterator<Item = (i64, i64)>) -> usize {
        pixels
            .filter(|&(x, y)| buffer.get_pixel(x, y).unwrap() == BLACK)
            .count()
    }

    fn stroke_rect(buffer: &mut PixelBuffer, a: (i64, i64), b: (i64, i64), size: u32) {
        draw_rect(buffer, a.into(), b.into(), Color::BLACK, size, 1.0, FillMode::Stroke);
    }

    #[test]
    fn rect_outline_size_one_is_a_single_ring() {
        let mut buffer = PixelBuffer::new(10, 10, WHITE);
        stroke_rect(&mut buffer, (1, 1), (8, 8), 1);

        let black = black_pixels(&buffer);
        assert_eq!(black.len(), 28);
        for (x, y) in black {
            assert!(x == 1 || x == 8 || y == 1 || y == 8, "({x}, {y})");
        }
        assert_eq!(buffer.get_pixel(4, 4).unwrap(), WHITE);
        assert_eq!(buffer.get_pixel(0, 0).unwrap(), WHITE);
    }

    #[test]
    fn rect_normalizes_reverse_drag() {
        let mut forward = PixelBuffer::new(10, 10, WHITE);
        let mut backward = PixelBuffer::new(10, 10, WHITE);
        let outline = style(1, FillMode::Stroke);
        let (a, b) = (Point::new(2, 7), Point::new(6, 1));
        draw_shape(&mut forward, ShapeKind::Rectangle, a, b, &outline);
        draw_shape(&mut backward, ShapeKind::Rectangle, b, a, &outline);
        assert_eq!(forward, backward);
        assert_eq!(forward.get_pixel(2, 1).unwrap(), BLACK);
        assert_eq!(forward.get_pixel(6, 7).unwrap(), BLACK);
    }

    #[test]
    fn thick_rect_ring_and_filled_rect() {
        let mut buffer = PixelBuffer::new(12, 12, WHITE);
        stroke_rect(&mut buffer, (3, 3), (8, 8), 3);
        // Size 3 is centered on the outline
        assert_eq!(buffer.get_pixel(2, 5).unwrap(), BLACK);
        assert_eq!(buffer.get_pixel(4, 5).unwrap(), BLACK);
        assert_eq!(buffer.get_pixel(5, 5).unwrap(), WHITE);
        assert_eq!(buffer.get_pixel(1, 5).unwrap(), WHITE);

        let mut filled = PixelBuffer::new(12, 12, WHITE);
        let (a, b) = (Point::new(3, 3), Point::new(8, 8));
        draw_rect(&mut filled, a, b, Color::BLACK, 3, 1.0, FillMode::Filled);
        assert_eq!(black_pixels(&filled).len(), 36);
    }

    #[test]
    fn stroke_widths_match_size() {
        let column = |x: i64, ys: std::ops::Range<i64>| ys.map(move |y| (x, y));
        let row = |y: i64, xs: std::ops::Range<i64>| xs.map(move |x| (x, y));

        for size in 1..=8u32 {
            let n = size as usize;
            let width = size as f32;

            let mut horizontal = PixelBuffer::new(30, 30, WHITE);
            let (a, b) = (Point::new(3, 15), Point::new(26, 15));
            draw_line(&mut horizontal, a, b, Color::BLACK, width, 1.0);
            assert_eq!(count_black(&horizontal, column(12, 0..30)), n, "line, size {size}");

            let mut vertical = PixelBuffer::new(30, 30, WHITE);
            let (a, b) = (Point::new(15, 3), Point::new(15, 26));
            draw_line(&mut vertical, a, b, Color::BLACK, width, 1.0);
            assert_eq!(count_black(&vertical, row(12, 0..30)), n, "line, size {size}");

            let mut rect = PixelBuffer::new(30, 30, WHITE);
            stroke_rect(&mut rect, (5, 5), (24, 24), size);
            assert_eq!(count_black(&rect, row(15, 0..15)), n, "rect left, size {size}");
            assert_eq!(count_black(&rect, row(15, 15..30)), n, "rect right, size {size}");
            assert_eq!(count_black(&rect, column(15, 0..15)), n, "rect top, size {size}");
            assert_eq!(count_black(&rect, column(15, 15..30)), n, "rect bottom, size {size}");

            let mut circle = PixelBuffer::new(31, 31, WHITE);
            let (a, b) = (Point::new(5, 5), Point::new(25, 25));
            draw_ellipse(&mut circle, a, b, Color::BLACK, size, 1.0, FillMode::Stroke);
            assert_eq!(count_black(&circle, column(15, 0..15)), n, "circle top, size {size}");
            assert_eq!(count_black(&circle, row(15, 0..15)), n, "circle left, size {size}");
        }
    }

    #[test]
    fn fractional_widths_round_to_whole_pixels() {
        let mut buffer = PixelBuffer::new(20, 20, WHITE);
        let (a, b) = (Point::new(2, 10), Point::new(17, 10));
        // 0.8 * 6 from a brush step
        draw_line(&mut buffer, a, b, Color::BLACK, 4.8, 1.0);
        assert_eq!(count_black(&buffer, (0..20).map(|y| (9, y))), 5);

        let mut hairline = PixelBuffer::new(20, 20, WHITE);
        draw_line(&mut hairline, a, b, Color::BLACK, 0.2, 1.0);
        assert_eq!(count_black(&hairline, (0..20).map(|y| (9, y))), 1);
    }

    #[test]
    fn horizontal_line_is_one_row() {
        let mut buffer = PixelBuffer::new(10, 5, WHITE);
        draw_line(&mut buffer, Point::new(1, 2), Point::new(8, 2), Color::BLACK, 1.0, 1.0);
        let black = black_pixels(&buffer);
        assert_eq!(black, (1..=8).map(|x| (x, 2)).collect::<Vec<_>>());
    }

    #[test]
    fn diagonal_line_is_connected() {
        let mut buffer = PixelBuffer::new(10, 10, WHITE);
        draw_line(&mut buffer, Point::new(0, 0), Point::new(9, 9), Color::BLACK, 1.0, 1.0);
        for i in 0..10 {
            assert_eq!(buffer.get_pixel(i, i).unwrap(), BLACK);
        }
    }

    #[test]
    fn line_alpha_blends() {
        let mut buffer = PixelBuffer::new(5, 1, WHITE);
        draw_line(&mut buffer, Point::new(0, 0), Point::new(4, 0), Color::BLACK, 1.0, 0.5);
        assert_eq!(buffer.get_pixel(2, 0).unwrap(), image::Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn ellipse_outline_leaves_center_and_corners() {
        let mut buffer = PixelBuffer::new(21, 21, WHITE);
        let (a, b) = (Point::new(0, 0), Point::new(20, 20));
        draw_ellipse(&mut buffer, a, b, Color::BLACK, 1, 1.0, FillMode::Stroke);
        // Extremes of the axes lie on the outline
        for (x, y) in [(10, 0), (0, 10), (20, 10), (10, 20)] {
            assert_eq!(buffer.get_pixel(x, y).unwrap(), BLACK, "({x}, {y})");
        }
        assert_eq!(buffer.get_pixel(10, 10).unwrap(), WHITE);
        assert_eq!(buffer.get_pixel(0, 0).unwrap(), WHITE);
        assert_eq!(buffer.get_pixel(20, 20).unwrap(), WHITE);
    }

    #[test]
    fn thin_ellipse_outline_has_no_gaps() {
        let mut buffer = PixelBuffer::new(8, 36, WHITE);
        let (a, b) = (Point::new(2, 2), Point::new(4, 32));
        draw_ellipse(&mut buffer, a, b, Color::BLACK, 1, 1.0, FillMode::Stroke);
        for y in 2..=32 {
            assert!(count_black(&buffer, (0..8).map(|x| (x, y))) > 0, "row {y}");
        }
    }

    #[test]
    fn filled_ellipse_covers_center() {
        let mut buffer = PixelBuffer::new(21, 11, WHITE);
        let (a, b) = (Point::new(0, 0), Point::new(20, 10));
        draw_ellipse(&mut buffer, a, b, Color::BLACK, 1, 1.0, FillMode::Filled);
        assert_eq!(buffer.get_pixel(10, 5).unwrap(), BLACK);
        assert_eq!(buffer.get_pixel(0, 5).unwrap(), BLACK);
        assert_eq!(buffer.get_pixel(0, 0).unwrap(), WHITE);
    }

    #[test]
    fn flat_ellipse_strokes_as_segment() {
        let (a, b) = (Point::new(1, 2), Point::new(7, 2));
        let mut buffer = PixelBuffer::new(10, 5, WHITE);
        draw_ellipse(&mut buffer, a, b, Color::BLACK, 1, 1.0, FillMode::Stroke);
        assert_eq!(black_pixels(&buffer).len(), 7);

        let mut filled = PixelBuffer::new(10, 5, WHITE);
        draw_ellipse(&mut filled, a, b, Color::BLACK, 1, 1.0, FillMode::Filled);
        assert!(black_pixels(&filled).is_empty());
    }

    #[test]
    fn shapes_clip_at_canvas_edges() {
        let mut buffer = PixelBuffer::new(6, 6, WHITE);
        stroke_rect(&mut buffer, (-3, -3), (2, 2), 1);
        assert_eq!(buffer.get_pixel(2, 0).unwrap(), BLACK);
        assert_eq!(buffer.get_pixel(0, 2).unwrap(), BLACK);
        assert_eq!(buffer.get_pixel(0, 0).unwrap(), WHITE);
    }
}
