use crate::color::{Color, composite, erase};
use crate::geometry::{PixelBox, Point};
use crate::pixel_buffer::PixelBuffer;

use super::shade_area;
use super::shapes::{draw_line, stroke_capsule};

/// Width of the connecting capsule relative to the brush size.
pub const CAPSULE_RATIO: f32 = 0.8;

/// Opacity of the soft dab at `t` (0 at the center, 1 at the rim).
/// Gradient stops: `alpha` at the center, `0.6 * alpha` halfway, 0 at the rim.
fn dab_falloff(t: f32, alpha: f32) -> f32 {
    if t < 0.5 {
        let k = t / 0.5;
        alpha + (alpha * 0.6 - alpha) * k
    } else {
        let k = (t - 0.5) / 0.5;
        alpha * 0.6 * (1.0 - k)
    }
}

/// Soft round dab of diameter `size` centered on `at`.
pub fn draw_dab(buffer: &mut PixelBuffer, at: Point, color: Color, size: u32, alpha: f32) {
    let radius = (size as f32 / 2.0).max(0.5);
    let area = PixelBox::from_corners(at, at).expand(radius.ceil() as i64);

    shade_area(buffer, area, |x, y, dst| {
        let dx = (x - at.x) as f32;
        let dy = (y - at.y) as f32;
        let t = (dx * dx + dy * dy).sqrt() / radius;
        if t >= 1.0 {
            return None;
        }
        let a = dab_falloff(t, alpha);
        (a > 0.0).then(|| composite(dst, color, a))
    });
}

/// One freehand brush step: a dab at the new sample plus a capsule back to
/// the previous one so quick pointer motion leaves no gaps.
pub fn paint_segment(
    buffer: &mut PixelBuffer,
    from: Point,
    to: Point,
    color: Color,
    size: u32,
    alpha: f32,
) {
    draw_dab(buffer, to, color, size, alpha);
    draw_line(buffer, from, to, color, size as f32 * CAPSULE_RATIO, alpha);
}

/// Hard transparent disk of radius `size` (destination-out at full strength).
pub fn erase_dab(buffer: &mut PixelBuffer, at: Point, size: u32) {
    stroke_capsule(buffer, at, at, eraser_width(size), |dst| erase(dst, 1.0));
}

/// One eraser step: the eraser disk at the new sample plus a capsule of the
/// same width back to the previous one.
pub fn erase_segment(buffer: &mut PixelBuffer, from: Point, to: Point, size: u32) {
    erase_dab(buffer, to, size);
    stroke_capsule(buffer, from, to, eraser_width(size), |dst| erase(dst, 1.0));
}

/// The eraser works at twice the nominal brush radius.
fn eraser_width(size: u32) -> f32 {
    size as f32 * 2.0
}
