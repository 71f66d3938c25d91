use eframe::egui;

use crate::color::Color;
use crate::command::Command;
use crate::config::CanvasConfig;
use crate::error::PaintResult;
use crate::panels::{central_panel, status_bar, tools_panel};
use crate::renderer::Renderer;
use crate::state::ToolController;
use crate::tool::{ToolKind, ToolSettings};

/// File written by the Save button on native targets
pub const EXPORT_FILE_NAME: &str = "drawing.png";

/// Tool selection restored when restarting the app.
/// We derive Deserialize/Serialize so we can persist it on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Preferences {
    pub tool: ToolKind,
    pub settings: ToolSettings,
}

pub struct PaintApp {
    controller: ToolController,
    renderer: Renderer,
    palette: Vec<Color>,
    /// Text of the hex color field, kept while the user is typing
    hex_input: String,
    /// Whether the clear confirmation is open
    show_clear_confirm: bool,
    /// Last outcome shown in the status bar
    status: String,
    /// Canvas pixel under the pointer
    hover: Option<(i64, i64)>,
    /// Pixel of the last pointer event sent to the controller in this gesture
    last_pointer: Option<(i64, i64)>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: CanvasConfig) -> Self {
        let preferences = cc
            .storage
            .and_then(|storage| eframe::get_value::<Preferences>(storage, eframe::APP_KEY));
        Self::with_config(config, preferences)
    }

    /// Build the app without a window, e.g. for tests.
    pub fn with_config(config: CanvasConfig, preferences: Option<Preferences>) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{err}; using the default canvas");
                CanvasConfig::default()
            }
        };
        let config = match preferences {
            Some(preferences) if preferences.settings.validate().is_ok() => {
                log::info!("Restored {} with saved settings", preferences.tool.label());
                CanvasConfig {
                    tool: preferences.tool,
                    settings: preferences.settings,
                    ..config
                }
            }
            _ => config,
        };

        let controller = match ToolController::from_config(&config) {
            Ok(controller) => controller,
            Err(err) => {
                log::warn!("{err}; using the default canvas");
                Self::default_controller()
            }
        };
        let palette = config.palette_colors().unwrap_or_default();

        Self {
            hex_input: controller.settings().color.to_hex(),
            controller,
            renderer: Renderer::new(),
            palette,
            show_clear_confirm: false,
            status: String::new(),
            hover: None,
            last_pointer: None,
        }
    }

    fn default_controller() -> ToolController {
        let config = CanvasConfig::default();
        ToolController::new(config.width, config.height, Color::WHITE, config.history_capacity)
    }

    pub fn controller(&self) -> &ToolController {
        &self.controller
    }

    /// The renderer together with the canvas it draws.
    pub fn renderer_and_canvas(&mut self) -> (&mut Renderer, &crate::pixel_buffer::PixelBuffer) {
        (&mut self.renderer, self.controller.canvas())
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            tool: self.controller.tool(),
            settings: *self.controller.settings(),
        }
    }

    pub fn hover(&self) -> Option<(i64, i64)> {
        self.hover
    }

    pub fn set_hover(&mut self, pixel: Option<(i64, i64)>) {
        self.hover = pixel;
    }

    pub fn hex_input_mut(&mut self) -> &mut String {
        &mut self.hex_input
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        log::info!("Tool selected: {}", tool.label());
        self.controller.set_tool(tool);
    }

    pub fn set_color(&mut self, color: Color) {
        self.controller.set_color(color);
        self.hex_input = color.to_hex();
    }

    /// Apply the hex field. An invalid entry is reported and reverted.
    pub fn commit_hex_input(&mut self) {
        let input = self.hex_input.trim().to_owned();
        if let Err(err) = self.controller.set_color_hex(&input) {
            self.status = err.to_string();
        }
        self.hex_input = self.controller.settings().color.to_hex();
    }

    pub fn set_size(&mut self, size: u32) {
        let result = self.controller.set_size(size);
        self.report(result);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        let result = self.controller.set_opacity(opacity);
        self.report(result);
    }

    pub fn set_fill_mode(&mut self, fill_mode: crate::raster::FillMode) {
        self.controller.set_fill_mode(fill_mode);
    }

    pub fn undo(&mut self) {
        let result = self.controller.undo();
        self.after_history(result, "Undo");
    }

    pub fn redo(&mut self) {
        let result = self.controller.redo();
        self.after_history(result, "Redo");
    }

    fn after_history(&mut self, result: PaintResult<()>, action: &str) {
        match result {
            Ok(()) => {
                self.renderer.mark_dirty();
                self.status = action.to_owned();
            }
            // Nothing to do; the buttons are disabled in this case anyway.
            Err(err) if err.is_history_noop() => log::debug!("{err}"),
            Err(err) => self.report::<()>(Err(err)),
        }
    }

    /// Ask before clearing; the canvas is cleared by [`PaintApp::confirm_clear`].
    pub fn request_clear(&mut self) {
        self.show_clear_confirm = true;
    }

    pub fn clear_requested(&self) -> bool {
        self.show_clear_confirm
    }

    pub fn confirm_clear(&mut self) {
        self.show_clear_confirm = false;
        let result = self.controller.clear();
        self.apply_result(result.map(Some));
    }

    pub fn cancel_clear(&mut self) {
        self.show_clear_confirm = false;
    }

    /// Encode the canvas and write it to [`EXPORT_FILE_NAME`].
    pub fn save_png(&mut self) {
        let png = match self.controller.export_png() {
            Ok(png) => png,
            Err(err) => return self.report::<()>(Err(err)),
        };
        self.write_export(&png);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn write_export(&mut self, png: &[u8]) {
        match std::fs::write(EXPORT_FILE_NAME, png) {
            Ok(()) => {
                log::info!("Saved {EXPORT_FILE_NAME}");
                self.status = format!("Saved {EXPORT_FILE_NAME}");
            }
            Err(err) => {
                log::warn!("Failed to write {EXPORT_FILE_NAME}: {err}");
                self.status = format!("Failed to save: {err}");
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn write_export(&mut self, png: &[u8]) {
        log::warn!("Saving is not available on the web ({} bytes encoded)", png.len());
        self.status = "Saving is not available on the web".to_owned();
    }

    /// Forward one pointer event and refresh the display if it drew.
    pub fn pointer_down(&mut self, x: i64, y: i64) {
        self.last_pointer = Some((x, y));
        let result = self.controller.pointer_down(x, y);
        self.apply_result(result);
    }

    /// Moves that stay on the pixel already sent are dropped, so a
    /// stationary pointer does not stack brush dabs frame after frame.
    pub fn pointer_move(&mut self, x: i64, y: i64) {
        if self.last_pointer == Some((x, y)) {
            return;
        }
        self.last_pointer = Some((x, y));
        let result = self.controller.pointer_move(x, y);
        self.apply_result(result);
    }

    pub fn pointer_up(&mut self, x: i64, y: i64) {
        self.last_pointer = None;
        let result = self.controller.pointer_up(x, y);
        self.apply_result(result);
    }

    pub fn pointer_leave(&mut self) {
        self.last_pointer = None;
        if self.controller.pointer_leave() {
            log::debug!("Pointer left the canvas mid-gesture");
        }
    }

    fn apply_result(&mut self, result: PaintResult<Option<Command>>) {
        match result {
            Ok(Some(Command::PickColor { color, .. })) => {
                self.hex_input = color.to_hex();
                self.status = format!("Picked {color}");
            }
            Ok(Some(command)) => {
                if command.mutates() {
                    self.renderer.mark_dirty();
                }
                if let Command::Fill { .. }
                | Command::Clear { .. }
                | Command::Shape { committed: true, .. } = command
                {
                    self.status = command.name().to_owned();
                }
            }
            Ok(None) => {}
            Err(err) => self.report::<()>(Err(err)),
        }
    }

    fn report<T>(&mut self, result: PaintResult<T>) {
        if let Err(err) = result {
            log::warn!("{err}");
            self.status = err.to_string();
        }
    }

    /// Ctrl+Z / Ctrl+Y / Ctrl+Shift+Z for history, single letters for tools.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, redo) = ctx.input_mut(|i| {
            let shift_command = egui::Modifiers::COMMAND | egui::Modifiers::SHIFT;
            let redo = i.consume_key(shift_command, egui::Key::Z)
                || i.consume_key(egui::Modifiers::COMMAND, egui::Key::Y);
            let undo = i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z);
            (undo, redo)
        });
        if undo {
            self.undo();
        }
        if redo {
            self.redo();
        }

        if ctx.wants_keyboard_input() {
            return;
        }
        let typed: Vec<ToolKind> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Text(text) if !i.modifiers.command => {
                        let mut chars = text.chars();
                        match (chars.next(), chars.next()) {
                            (Some(key), None) => ToolKind::from_shortcut(key.to_ascii_lowercase()),
                            _ => None,
                        }
                    }
                    _ => None,
                })
                .collect()
        });
        if let Some(tool) = typed.last() {
            self.set_tool(*tool);
        }
    }

    fn clear_confirm_window(&mut self, ctx: &egui::Context) {
        if !self.show_clear_confirm {
            return;
        }
        egui::Window::new("Clear canvas?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("The whole canvas will be filled with the background color.");
                ui.label("This can be undone.");
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        self.confirm_clear();
                    }
                    if ui.button("Cancel").clicked() {
                        self.cancel_clear();
                    }
                });
            });
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.preferences());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        tools_panel(self, ctx);
        status_bar(self, ctx);
        central_panel(self, ctx);

        self.clear_confirm_window(ctx);
    }
}

impl std::fmt::Debug for PaintApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintApp")
            .field("controller", &self.controller)
            .field("renderer", &self.renderer)
            .field("status", &self.status)
            .finish()
    }
}
