use crate::color::{Color, Rgba};
use crate::command::{Command, History};
use crate::config::CanvasConfig;
use crate::error::PaintResult;
use crate::geometry::Point;
use crate::pixel_buffer::PixelBuffer;
use crate::raster::FillMode;
use crate::tool::{Tool, ToolKind, ToolSettings, validate_opacity, validate_size};

use super::EditorState;

/// Owns the canvas and its history and turns pointer events into drawing.
///
/// Every event is handled to completion before the call returns; the
/// `Command` that was run comes back so the host knows what changed and
/// when to re-blit the canvas.
///
/// Tool and settings changes take effect on the next pointer-down. A gesture
/// in progress keeps the tool it started with.
pub struct ToolController {
    canvas: PixelBuffer,
    history: History,
    state: EditorState,
    tool: ToolKind,
    settings: ToolSettings,
    background: Rgba,
}

impl ToolController {
    /// A blank canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color, history_capacity: usize) -> Self {
        let background = background.to_pixel();
        Self {
            canvas: PixelBuffer::new(width, height, background),
            history: History::new(history_capacity),
            state: EditorState::Idle,
            tool: ToolKind::default(),
            settings: ToolSettings::default(),
            background,
        }
    }

    pub fn from_config(config: &CanvasConfig) -> PaintResult<Self> {
        let background = Color::from_hex(&config.background)?;
        config.settings.validate()?;

        let mut controller =
            Self::new(config.width, config.height, background, config.history_capacity);
        controller.tool = config.tool;
        controller.settings = config.settings;
        log::info!(
            "Created {}x{} canvas, background {}, {} undo steps",
            config.width,
            config.height,
            config.background,
            controller.history.capacity()
        );
        Ok(controller)
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// The selected tool (used from the next pointer-down)
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            log::debug!("Tool {} -> {}", self.tool.label(), tool.label());
            self.tool = tool;
        }
    }

    /// Alpha outside `[0, 1]` is clamped; NaN becomes opaque.
    pub fn set_color(&mut self, color: Color) {
        self.settings.color = color.normalized();
    }

    /// Set the color from `#RGB` / `#RRGGBB`. On error the current color stays.
    pub fn set_color_hex(&mut self, hex: &str) -> PaintResult<()> {
        let color = Color::from_hex(hex).inspect_err(|err| {
            log::warn!("{err}; keeping {}", self.settings.color);
        })?;
        self.settings.color = color;
        Ok(())
    }

    pub fn set_size(&mut self, size: u32) -> PaintResult<()> {
        validate_size(size)?;
        self.settings.size = size;
        Ok(())
    }

    pub fn set_opacity(&mut self, opacity: f32) -> PaintResult<()> {
        validate_opacity(opacity)?;
        self.settings.opacity = opacity;
        Ok(())
    }

    pub fn set_fill_mode(&mut self, fill_mode: FillMode) {
        self.settings.fill_mode = fill_mode;
    }

    /// Replace all settings at once; rejected as a whole if any is invalid.
    pub fn set_settings(&mut self, settings: ToolSettings) -> PaintResult<()> {
        settings.validate()?;
        self.settings = ToolSettings { color: settings.color.normalized(), ..settings };
        Ok(())
    }

    /// Diameter of the on-screen cursor outline for the selected tool.
    pub fn cursor_diameter(&self) -> u32 {
        match self.tool {
            ToolKind::Eraser => self.settings.size.saturating_mul(2),
            _ => self.settings.size,
        }
    }

    /// Start a gesture, or run a single-shot tool.
    pub fn pointer_down(&mut self, x: i64, y: i64) -> PaintResult<Option<Command>> {
        let at = self.locate(x, y)?;
        if self.state.is_dragging() {
            log::warn!("Pointer down during a gesture; finishing the previous one");
            self.end_gesture();
        }

        let tool = self.tool.configure(&self.settings);
        match tool {
            Tool::Eyedropper => {
                let color = Color::from_pixel(self.canvas.get_pixel(at.x, at.y)?);
                self.settings.color = color;
                log::debug!("Picked {color} at ({}, {})", at.x, at.y);
                Ok(Some(Command::PickColor { at, color }))
            }
            Tool::Fill { color } => {
                let command = Command::Fill { at, color };
                self.commit(&command)?;
                Ok(Some(command))
            }
            Tool::Brush(brush) => {
                let command = Command::BrushDab { at, brush };
                self.commit(&command)?;
                self.begin_drag(tool, at, false);
                Ok(Some(command))
            }
            Tool::Eraser(brush) => {
                let command = Command::EraseDab { at, size: brush.size };
                self.commit(&command)?;
                self.begin_drag(tool, at, false);
                Ok(Some(command))
            }
            Tool::Line(_) | Tool::Rectangle(_) | Tool::Ellipse(_) => {
                // Nothing is drawn yet, but the history entry is the state
                // the finished shape will be undone to.
                self.history.begin_mutation(&self.canvas);
                self.begin_drag(tool, at, true);
                Ok(None)
            }
        }
    }

    /// Continue the gesture: brush and eraser paint incrementally, shapes
    /// redraw their preview from the drag-start snapshot.
    pub fn pointer_move(&mut self, x: i64, y: i64) -> PaintResult<Option<Command>> {
        if self.state.is_idle() {
            return Ok(None);
        }
        let at = self.locate(x, y)?;

        let EditorState::Dragging { tool, start, last, preview } = &mut self.state else {
            return Ok(None);
        };

        let command = match *tool {
            Tool::Brush(brush) => Command::BrushSegment { from: *last, to: at, brush },
            Tool::Eraser(brush) => Command::EraseSegment { from: *last, to: at, size: brush.size },
            _ => match tool.shape() {
                Some((kind, style)) => {
                    if let Some(snapshot) = preview {
                        self.canvas.restore(snapshot)?;
                    }
                    Command::Shape { kind, start: *start, end: at, style, committed: false }
                }
                None => return Ok(None),
            },
        };

        *last = at;
        command.apply(&mut self.canvas)?;
        Ok(Some(command))
    }

    /// Finish the gesture. Shapes are drawn once more against the pointer-up
    /// position on top of the drag-start snapshot.
    pub fn pointer_up(&mut self, x: i64, y: i64) -> PaintResult<Option<Command>> {
        if self.state.is_idle() {
            return Ok(None);
        }
        let at = self.locate(x, y)?;

        let EditorState::Dragging { tool, start, preview, .. } =
            self.transition_to(EditorState::Idle)
        else {
            return Ok(None);
        };
        let Some((kind, style)) = tool.shape() else {
            return Ok(None);
        };

        if let Some(snapshot) = preview {
            self.canvas.replace(snapshot)?;
        }
        let command = Command::Shape { kind, start, end: at, style, committed: true };
        command.apply(&mut self.canvas)?;
        log::debug!(
            "Committed {} from ({}, {}) to ({}, {})",
            command.name(),
            start.x,
            start.y,
            at.x,
            at.y
        );
        Ok(Some(command))
    }

    /// The pointer left the canvas. Ends the gesture like pointer-up, keeping
    /// whatever the last move drew. Returns true if a gesture was ended.
    pub fn pointer_leave(&mut self) -> bool {
        if self.state.is_idle() {
            return false;
        }
        self.end_gesture();
        true
    }

    pub fn undo(&mut self) -> PaintResult<()> {
        self.settle("undo");
        self.history.undo(&mut self.canvas)
    }

    pub fn redo(&mut self) -> PaintResult<()> {
        self.settle("redo");
        self.history.redo(&mut self.canvas)
    }

    /// Refill the canvas with the background color, as an undoable step.
    pub fn clear(&mut self) -> PaintResult<Command> {
        self.settle("clear");
        let command = Command::Clear { background: self.background };
        self.commit(&command)?;
        log::info!("Cleared canvas");
        Ok(command)
    }

    /// The current canvas as PNG bytes.
    pub fn export_png(&self) -> PaintResult<Vec<u8>> {
        self.canvas.encode_png()
    }

    fn locate(&self, x: i64, y: i64) -> PaintResult<Point> {
        self.canvas
            .check_bounds(x, y)
            .map(|_| Point::new(x, y))
            .inspect_err(|err| log::warn!("Rejected pointer event: {err}"))
    }

    /// Record history, then run a command that is known to succeed.
    fn commit(&mut self, command: &Command) -> PaintResult<()> {
        self.history.begin_mutation(&self.canvas);
        command.apply(&mut self.canvas)
    }

    fn begin_drag(&mut self, tool: Tool, at: Point, with_preview: bool) {
        let preview = with_preview.then(|| self.canvas.snapshot());
        self.transition_to(EditorState::Dragging { tool, start: at, last: at, preview });
    }

    fn end_gesture(&mut self) {
        self.transition_to(EditorState::Idle);
    }

    /// History operations never run mid-gesture.
    fn settle(&mut self, action: &str) {
        if self.state.is_dragging() {
            log::debug!("Ending gesture before {action}");
            self.end_gesture();
        }
    }

    fn transition_to(&mut self, next: EditorState) -> EditorState {
        debug_assert!(
            self.state.can_transition_to(&next),
            "invalid transition {} -> {}",
            self.state.name(),
            next.name()
        );
        log::debug!("State {} -> {}", self.state.name(), next.name());
        std::mem::replace(&mut self.state, next)
    }
}

impl std::fmt::Debug for ToolController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolController")
            .field("canvas", &self.canvas)
            .field("history", &self.history)
            .field("state", &self.state.name())
            .field("tool", &self.tool)
            .finish()
    }
}
