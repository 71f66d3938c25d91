//! Pixel-exact rasterizers that paint straight into a [`PixelBuffer`].
//!
//! Everything here clips to the canvas; drawing partly or entirely off the
//! edge is not an error.

pub mod brush;
pub mod fill;
pub mod shapes;

pub use brush::{draw_dab, erase_dab, erase_segment, paint_segment};
pub use fill::flood_fill;
pub use shapes::{FillMode, ShapeKind, ShapeStyle, draw_ellipse, draw_line, draw_rect, draw_shape};

use crate::color::Rgba;
use crate::geometry::PixelBox;
use crate::pixel_buffer::PixelBuffer;

/// Visit every on-canvas pixel of `area` and let `shade` decide its new value.
/// `shade` returns `None` to leave a pixel untouched.
pub(crate) fn shade_area(
    buffer: &mut PixelBuffer,
    area: PixelBox,
    mut shade: impl FnMut(i64, i64, Rgba) -> Option<Rgba>,
) {
    let Some(area) = area.clip(buffer.width(), buffer.height()) else {
        return;
    };
    for y in area.min_y..=area.max_y {
        for x in area.min_x..=area.max_x {
            buffer.blend_pixel(x, y, |dst| shade(x, y, dst).unwrap_or(dst));
        }
    }
}
