use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{PaintError, PaintResult};
use crate::raster::{FillMode, ShapeKind, ShapeStyle};

/// The tools a user can pick. This is the selection only; see [`Tool`] for a
/// tool bound to the parameters of one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Fill,
    Line,
    Rectangle,
    Ellipse,
    Eyedropper,
}

impl ToolKind {
    /// All tools in toolbar order
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Fill,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Eyedropper,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
            ToolKind::Fill => "Fill",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
            ToolKind::Eyedropper => "Eyedropper",
        }
    }

    /// Single-key shortcut
    pub fn shortcut(&self) -> char {
        match self {
            ToolKind::Brush => 'b',
            ToolKind::Eraser => 'e',
            ToolKind::Fill => 'f',
            ToolKind::Line => 'l',
            ToolKind::Rectangle => 'r',
            ToolKind::Ellipse => 'c',
            ToolKind::Eyedropper => 'i',
        }
    }

    pub fn from_shortcut(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.shortcut() == key)
    }

    /// Bind this tool to the current settings for one gesture.
    pub fn configure(self, settings: &ToolSettings) -> Tool {
        let brush = BrushParams {
            color: settings.color,
            size: settings.size,
            opacity: settings.opacity,
        };
        let style = ShapeStyle {
            color: settings.color,
            size: settings.size,
            opacity: settings.opacity,
            fill: settings.fill_mode,
        };
        match self {
            ToolKind::Brush => Tool::Brush(brush),
            ToolKind::Eraser => Tool::Eraser(brush),
            ToolKind::Fill => Tool::Fill { color: settings.color },
            ToolKind::Line => Tool::Line(style),
            ToolKind::Rectangle => Tool::Rectangle(style),
            ToolKind::Ellipse => Tool::Ellipse(style),
            ToolKind::Eyedropper => Tool::Eyedropper,
        }
    }
}

/// Parameters of a freehand stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushParams {
    pub color: Color,
    pub size: u32,
    pub opacity: f32,
}

/// A tool together with the parameters it was picked up with.
///
/// A gesture keeps its `Tool` from pointer-down to pointer-up, so changing
/// settings mid-drag only affects the next gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tool {
    Brush(BrushParams),
    /// Color and opacity are carried but unused; the eraser always clears.
    Eraser(BrushParams),
    /// Exact-match bucket fill
    Fill { color: Color },
    Line(ShapeStyle),
    Rectangle(ShapeStyle),
    Ellipse(ShapeStyle),
    Eyedropper,
}

impl Tool {
    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::Brush(_) => ToolKind::Brush,
            Tool::Eraser(_) => ToolKind::Eraser,
            Tool::Fill { .. } => ToolKind::Fill,
            Tool::Line(_) => ToolKind::Line,
            Tool::Rectangle(_) => ToolKind::Rectangle,
            Tool::Ellipse(_) => ToolKind::Ellipse,
            Tool::Eyedropper => ToolKind::Eyedropper,
        }
    }

    /// The shape and its style, for the drag-to-draw tools.
    pub fn shape(&self) -> Option<(ShapeKind, ShapeStyle)> {
        match *self {
            Tool::Line(style) => Some((ShapeKind::Line, style)),
            Tool::Rectangle(style) => Some((ShapeKind::Rectangle, style)),
            Tool::Ellipse(style) => Some((ShapeKind::Ellipse, style)),
            _ => None,
        }
    }
}

/// User-adjustable drawing parameters shared by all tools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    #[serde(with = "crate::color::hex")]
    pub color: Color,
    pub size: u32,
    pub opacity: f32,
    pub fill_mode: FillMode,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: Color::rgb(0xe6, 0x39, 0x46),
            size: 6,
            opacity: 1.0,
            fill_mode: FillMode::Stroke,
        }
    }
}

impl ToolSettings {
    pub fn validate(&self) -> PaintResult<()> {
        validate_size(self.size)?;
        validate_opacity(self.opacity)?;
        Ok(())
    }
}

pub(crate) fn validate_size(size: u32) -> PaintResult<()> {
    if size == 0 {
        return Err(PaintError::InvalidSize(size));
    }
    Ok(())
}

pub(crate) fn validate_opacity(opacity: f32) -> PaintResult<()> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(PaintError::InvalidOpacity(opacity));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_round_trip() {
        for tool in ToolKind::ALL {
            assert_eq!(ToolKind::from_shortcut(tool.shortcut()), Some(tool));
        }
        assert_eq!(ToolKind::from_shortcut('c'), Some(ToolKind::Ellipse));
        assert_eq!(ToolKind::from_shortcut('x'), None);
    }

    #[test]
    fn configure_carries_settings() {
        let settings = ToolSettings {
            color: Color::rgb(1, 2, 3),
            size: 9,
            opacity: 0.25,
            fill_mode: FillMode::Filled,
        };
        match ToolKind::Rectangle.configure(&settings) {
            Tool::Rectangle(style) => {
                assert_eq!(style.color, Color::rgb(1, 2, 3));
                assert_eq!(style.size, 9);
                assert_eq!(style.opacity, 0.25);
                assert_eq!(style.fill, FillMode::Filled);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(ToolKind::Eyedropper.configure(&settings), Tool::Eyedropper);
        assert_eq!(ToolKind::Fill.configure(&settings).kind(), ToolKind::Fill);
    }

    #[test]
    fn settings_validation() {
        assert!(ToolSettings::default().validate().is_ok());
        let zero = ToolSettings { size: 0, ..Default::default() };
        assert!(matches!(zero.validate(), Err(PaintError::InvalidSize(0))));
        let nan = ToolSettings { opacity: f32::NAN, ..Default::default() };
        assert!(matches!(nan.validate(), Err(PaintError::InvalidOpacity(_))));
    }

    #[test]
    fn settings_serialize_color_as_hex() {
        let json = serde_json::to_string(&ToolSettings::default()).unwrap();
        assert!(json.contains("\"#e63946\""), "{json}");
        let back: ToolSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ToolSettings::default());
    }
}
