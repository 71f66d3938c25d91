use eframe::egui;

use crate::PaintApp;
use crate::components::{ToolButton, swatch};
use crate::raster::FillMode;
use crate::tool::ToolKind;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.controller().tool();
            ui.horizontal_wrapped(|ui| {
                for tool in ToolKind::ALL {
                    if ToolButton::new(tool, tool == active).show(ui).clicked() {
                        app.set_tool(tool);
                    }
                }
            });
            ui.label(active.label());
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.controller().history().can_undo();
                let can_redo = app.controller().history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            let history = app.controller().history();
            ui.horizontal(|ui| {
                ui.label(format!("Undo: {}/{}", history.undo_len(), history.capacity()));
                ui.label(format!("Redo: {}", history.redo_len()));
            });
            ui.separator();

            ui.heading("Color");
            let current = app.controller().settings().color;
            ui.horizontal(|ui| {
                let mut rgb = [current.r, current.g, current.b];
                if egui::color_picker::color_edit_button_srgb(ui, &mut rgb).changed() {
                    let [r, g, b] = rgb;
                    app.set_color(crate::color::Color::rgb(r, g, b));
                }

                let hex_field = egui::TextEdit::singleline(app.hex_input_mut()).desired_width(80.0);
                let response = ui.add(hex_field);
                if response.lost_focus() {
                    app.commit_hex_input();
                }
            });

            ui.horizontal_wrapped(|ui| {
                let palette = app.palette().to_vec();
                for color in palette {
                    let selected = (color.r, color.g, color.b) == (current.r, current.g, current.b);
                    if swatch(ui, color, selected).clicked() {
                        app.set_color(color);
                    }
                }
            });
            ui.separator();

            ui.heading("Tool Options");
            let settings = *app.controller().settings();

            let mut size = settings.size;
            if ui
                .add(egui::Slider::new(&mut size, 1..=100).text("Size"))
                .changed()
            {
                app.set_size(size);
            }

            let mut opacity = settings.opacity;
            if ui
                .add(egui::Slider::new(&mut opacity, 0.0..=1.0).text("Opacity"))
                .changed()
            {
                app.set_opacity(opacity);
            }

            ui.horizontal(|ui| {
                ui.label("Shapes:");
                for (mode, label) in [(FillMode::Stroke, "Outline"), (FillMode::Filled, "Filled")] {
                    if ui.selectable_label(settings.fill_mode == mode, label).clicked() {
                        app.set_fill_mode(mode);
                    }
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    app.request_clear();
                }
                if ui.button("Save").on_hover_text(crate::app::EXPORT_FILE_NAME).clicked() {
                    app.save_png();
                }
            });
        });
}
