use eframe::egui;

use crate::PaintApp;

/// Shows the canvas at 1:1 scale and feeds it pointer events.
pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let canvas = app.controller().canvas();
            let size = egui::vec2(canvas.width() as f32, canvas.height() as f32);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
            let rect = response.rect;

            handle_input(app, ui, rect);

            render(app, ctx, &painter, rect);
            cursor_preview(app, ui, &painter, rect);
        });
    });
}

/// Canvas pixel under `pos`, or `None` off the canvas.
fn pixel_at(rect: egui::Rect, pos: egui::Pos2) -> Option<(i64, i64)> {
    if !rect.contains(pos) {
        return None;
    }
    let local = pos - rect.min;
    let x = (local.x.floor() as i64).min(rect.width() as i64 - 1);
    let y = (local.y.floor() as i64).min(rect.height() as i64 - 1);
    Some((x, y))
}

fn handle_input(app: &mut PaintApp, ui: &egui::Ui, rect: egui::Rect) {
    let (pressed, down, released, pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
        )
    });
    let pixel = pos.and_then(|pos| pixel_at(rect, pos));
    app.set_hover(pixel);

    if pressed {
        if let Some((x, y)) = pixel {
            app.pointer_down(x, y);
        }
        return;
    }
    if !app.controller().is_dragging() {
        return;
    }

    match pixel {
        Some((x, y)) if released || !down => app.pointer_up(x, y),
        Some((x, y)) => app.pointer_move(x, y),
        None => app.pointer_leave(),
    }
}

fn render(app: &mut PaintApp, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
    let (renderer, canvas) = app.renderer_and_canvas();
    renderer.render(ctx, painter, rect, canvas);
}

/// Outline of the brush footprint under the pointer.
fn cursor_preview(app: &PaintApp, ui: &egui::Ui, painter: &egui::Painter, rect: egui::Rect) {
    let Some(pos) = ui.input(|i| i.pointer.hover_pos()) else {
        return;
    };
    if !rect.contains(pos) {
        return;
    }
    let radius = app.controller().cursor_diameter() as f32 / 2.0;
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(90));
    painter.circle_stroke(pos, radius.max(1.0), stroke);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_positions_to_pixels() {
        let rect = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(10.0, 10.0));
        assert_eq!(pixel_at(rect, egui::pos2(100.0, 50.0)), Some((0, 0)));
        assert_eq!(pixel_at(rect, egui::pos2(105.7, 52.2)), Some((5, 2)));
        assert_eq!(pixel_at(rect, egui::pos2(110.0, 60.0)), Some((9, 9)));
        assert_eq!(pixel_at(rect, egui::pos2(99.0, 55.0)), None);
    }
}
