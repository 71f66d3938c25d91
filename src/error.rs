use thiserror::Error;

/// Errors raised by the paint engine.
///
/// None of these leave the raster half-written: a call that fails has not
/// touched the buffer and has not pushed a history entry.
#[derive(Debug, Error)]
pub enum PaintError {
    /// Pixel access outside the canvas. The host is expected to clip
    /// pointer coordinates before handing them to the engine.
    #[error("pixel ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    #[error("invalid color format: {0:?} (expected #RGB or #RRGGBB)")]
    InvalidColorFormat(String),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("brush size must be greater than zero, got {0}")]
    InvalidSize(u32),

    #[error("opacity must be within [0, 1], got {0}")]
    InvalidOpacity(f32),

    /// A snapshot taken from a canvas of different dimensions.
    #[error("snapshot is {got_width}x{got_height} but the canvas is {width}x{height}")]
    SnapshotMismatch {
        width: u32,
        height: u32,
        got_width: u32,
        got_height: u32,
    },

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

impl PaintError {
    /// True for the benign history conditions the host treats as a no-op.
    pub fn is_history_noop(&self) -> bool {
        matches!(self, Self::NothingToUndo | Self::NothingToRedo)
    }
}

/// Result type for engine operations
pub type PaintResult<T> = Result<T, PaintError>;
