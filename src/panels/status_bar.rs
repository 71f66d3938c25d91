use eframe::egui;

use crate::PaintApp;

pub fn status_bar(app: &PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        let controller = app.controller();
        let settings = controller.settings();
        ui.horizontal(|ui| {
            ui.label(format!("Tool: {}", controller.tool().label()));
            ui.separator();
            ui.label(format!("Size: {}", settings.size));
            ui.label(format!("Opacity: {:.0}%", settings.opacity * 100.0));
            ui.label(format!("Color: {}", settings.color));
            ui.separator();
            ui.label(format!("{}x{}", controller.canvas().width(), controller.canvas().height()));
            if let Some((x, y)) = app.hover() {
                ui.label(format!("({x}, {y})"));
            }
            if let Some(tool) = controller.state().current_tool() {
                ui.separator();
                ui.label(format!("{} ({})", controller.state().name(), tool.kind().label()));
            }
            if !app.status().is_empty() {
                ui.separator();
                ui.label(app.status());
            }
        });
    });
}
