mod controller;
mod editor_state;

pub use controller::ToolController;
pub use editor_state::EditorState;
