//! Gesture state of the tool controller.
//!
//! ```text
//!            pointer-down (continuous tool)
//!   ┌──────┐ ─────────────────────────────► ┌──────────┐
//!   │ Idle │                                │ Dragging │ ◄─┐ pointer-move
//!   └──────┘ ◄───────────────────────────── └──────────┘ ──┘
//!      ▲  │     pointer-up / pointer-leave
//!      └──┘
//!   pointer-down (Fill, Eyedropper)
//! ```
//!
//! Single-shot tools act on pointer-down and never leave `Idle`.

use crate::geometry::Point;
use crate::pixel_buffer::Snapshot;
use crate::tool::Tool;

#[derive(Debug, Clone, Default)]
pub enum EditorState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Pointer is down with a continuous tool
    Dragging {
        /// The tool and the settings it was picked up with
        tool: Tool,
        start: Point,
        /// Most recent pointer sample, the origin of the next brush step
        last: Point,
        /// Canvas at drag start, restored before each shape preview.
        /// Never part of the undo history.
        preview: Option<Snapshot>,
    },
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            (EditorState::Idle, EditorState::Dragging { .. }) => true,
            (EditorState::Dragging { .. }, EditorState::Idle) => true,
            _ => false,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, EditorState::Dragging { .. })
    }

    /// The tool of the gesture in progress
    pub fn current_tool(&self) -> Option<&Tool> {
        match self {
            EditorState::Dragging { tool, .. } => Some(tool),
            EditorState::Idle => None,
        }
    }

    pub fn has_preview(&self) -> bool {
        matches!(self, EditorState::Dragging { preview: Some(_), .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Dragging { .. } => "Dragging",
        }
    }
}
