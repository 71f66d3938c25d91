#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod components;
pub mod config;
pub mod error;
pub mod geometry;
pub mod panels;
pub mod pixel_buffer;
pub mod raster;
pub mod renderer;
pub mod state;
pub mod tool;

pub use app::{PaintApp, Preferences};
pub use color::{Color, Rgba};
pub use command::{Command, History};
pub use config::{CanvasConfig, ConfigError};
pub use error::{PaintError, PaintResult};
pub use geometry::Point;
pub use pixel_buffer::{PixelBuffer, Snapshot};
pub use raster::{FillMode, ShapeKind, ShapeStyle};
pub use renderer::Renderer;
pub use state::{EditorState, ToolController};
pub use tool::{Tool, ToolKind, ToolSettings};
