use eframe::egui::{self, Color32, ColorImage, TextureHandle, TextureOptions};

use crate::pixel_buffer::PixelBuffer;

/// Uploads the raster to the GPU and paints it.
///
/// The texture is only re-uploaded after [`Renderer::mark_dirty`], so an idle
/// canvas costs one textured quad per frame.
pub struct Renderer {
    texture: Option<TextureHandle>,
    dirty: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            texture: None,
            dirty: true,
        }
    }

    /// The canvas changed since the last upload.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Draw `canvas` stretched over `rect`, uploading it first if needed.
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: egui::Rect,
        canvas: &PixelBuffer,
    ) {
        self.upload(ctx, canvas);
        if let Some(texture) = &self.texture {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }

    fn upload(&mut self, ctx: &egui::Context, canvas: &PixelBuffer) {
        let dirty = std::mem::take(&mut self.dirty);
        let image = || {
            ColorImage::from_rgba_unmultiplied(
                [canvas.width() as usize, canvas.height() as usize],
                canvas.as_raw(),
            )
        };
        match &mut self.texture {
            Some(texture) => {
                if dirty {
                    texture.set(image(), TextureOptions::NEAREST);
                }
            }
            None => {
                log::debug!("Creating canvas texture {}x{}", canvas.width(), canvas.height());
                self.texture = Some(ctx.load_texture("canvas", image(), TextureOptions::NEAREST));
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("uploaded", &self.texture.is_some())
            .field("dirty", &self.dirty)
            .finish()
    }
}
