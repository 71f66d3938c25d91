use crate::color::{Color, Rgba};
use crate::error::PaintResult;
use crate::geometry::Point;
use crate::pixel_buffer::PixelBuffer;
use crate::raster::{self, ShapeKind, ShapeStyle};
use crate::tool::BrushParams;

/// One change to the canvas, as performed by the tool controller.
///
/// Every pointer event that touches the raster yields the `Command` it ran,
/// so the host can tell what happened without diffing pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Bucket fill seeded at `at`
    Fill { at: Point, color: Color },

    /// Soft dab that starts a brush stroke
    BrushDab { at: Point, brush: BrushParams },

    /// Brush step between two pointer samples
    BrushSegment { from: Point, to: Point, brush: BrushParams },

    /// Eraser disk that starts an eraser stroke
    EraseDab { at: Point, size: u32 },

    /// Eraser step between two pointer samples
    EraseSegment { from: Point, to: Point, size: u32 },

    /// A shape drawn against the drag-start snapshot. `committed` is false
    /// for previews redrawn while the pointer is still down.
    Shape {
        kind: ShapeKind,
        start: Point,
        end: Point,
        style: ShapeStyle,
        committed: bool,
    },

    /// Refill the whole canvas
    Clear { background: Rgba },

    /// Eyedropper read; changes the current color, not the canvas
    PickColor { at: Point, color: Color },
}

impl Command {
    /// Run the command against `buffer`.
    ///
    /// Shape commands draw on whatever is in the buffer; restoring the
    /// drag-start snapshot first is the caller's job.
    pub fn apply(&self, buffer: &mut PixelBuffer) -> PaintResult<()> {
        match self {
            Command::Fill { at, color } => {
                raster::flood_fill(buffer, at.x, at.y, color.to_pixel())?;
            }
            Command::BrushDab { at, brush } => {
                raster::draw_dab(buffer, *at, brush.color, brush.size, brush.opacity);
            }
            Command::BrushSegment { from, to, brush } => {
                raster::paint_segment(buffer, *from, *to, brush.color, brush.size, brush.opacity);
            }
            Command::EraseDab { at, size } => raster::erase_dab(buffer, *at, *size),
            Command::EraseSegment { from, to, size } => {
                raster::erase_segment(buffer, *from, *to, *size);
            }
            Command::Shape { kind, start, end, style, .. } => {
                raster::draw_shape(buffer, *kind, *start, *end, style);
            }
            Command::Clear { background } => buffer.clear(*background),
            Command::PickColor { .. } => {}
        }
        Ok(())
    }

    /// Whether running this command changes pixels.
    pub fn mutates(&self) -> bool {
        !matches!(self, Command::PickColor { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Fill { .. } => "Fill",
            Command::BrushDab { .. } | Command::BrushSegment { .. } => "Brush",
            Command::EraseDab { .. } | Command::EraseSegment { .. } => "Erase",
            Command::Shape { kind: ShapeKind::Line, .. } => "Line",
            Command::Shape { kind: ShapeKind::Rectangle, .. } => "Rectangle",
            Command::Shape { kind: ShapeKind::Ellipse, .. } => "Ellipse",
            Command::Clear { .. } => "Clear",
            Command::PickColor { .. } => "Pick Color",
        }
    }
}
