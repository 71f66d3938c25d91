use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

use crate::color::Rgba;
use crate::error::{PaintError, PaintResult};

/// An immutable full copy of a canvas' pixels.
///
/// Snapshots own their data; mutating the canvas afterwards never changes a
/// snapshot that was taken earlier.
#[derive(Clone, PartialEq)]
pub struct Snapshot {
    pixels: RgbaImage,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Fixed-size RGBA raster the tools paint into.
///
/// Backed by a contiguous `width * height * 4` byte buffer. Public pixel
/// access is bounds-checked; the rasterizers clip before writing.
#[derive(Clone, PartialEq)]
pub struct PixelBuffer {
    pixels: RgbaImage,
}

impl PixelBuffer {
    /// A canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    /// Fails with `OutOfBounds` unless `(x, y)` lies on the canvas.
    pub fn check_bounds(&self, x: i64, y: i64) -> PaintResult<(u32, u32)> {
        if self.contains(x, y) {
            Ok((x as u32, y as u32))
        } else {
            Err(PaintError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    pub fn get_pixel(&self, x: i64, y: i64) -> PaintResult<Rgba> {
        let (x, y) = self.check_bounds(x, y)?;
        Ok(*self.pixels.get_pixel(x, y))
    }

    pub fn set_pixel(&mut self, x: i64, y: i64, pixel: Rgba) -> PaintResult<()> {
        let (x, y) = self.check_bounds(x, y)?;
        self.pixels.put_pixel(x, y, pixel);
        Ok(())
    }

    /// Read-modify-write of one pixel; positions off the canvas are skipped.
    pub(crate) fn blend_pixel(&mut self, x: i64, y: i64, f: impl FnOnce(Rgba) -> Rgba) {
        if self.contains(x, y) {
            let pixel = self.pixels.get_pixel_mut(x as u32, y as u32);
            *pixel = f(*pixel);
        }
    }

    /// Fill every pixel with `pixel`.
    pub fn clear(&mut self, pixel: Rgba) {
        for p in self.pixels.pixels_mut() {
            *p = pixel;
        }
    }

    /// Deep copy of the current pixels.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pixels: self.pixels.clone(),
        }
    }

    /// Copy `snapshot` back into the canvas. The snapshot stays usable.
    pub fn restore(&mut self, snapshot: &Snapshot) -> PaintResult<()> {
        self.ensure_same_size(snapshot)?;
        self.pixels.copy_from_slice(snapshot.as_raw());
        Ok(())
    }

    /// Like `restore`, but takes ownership and avoids the copy.
    pub(crate) fn replace(&mut self, snapshot: Snapshot) -> PaintResult<()> {
        self.ensure_same_size(&snapshot)?;
        self.pixels = snapshot.pixels;
        Ok(())
    }

    pub(crate) fn ensure_same_size(&self, snapshot: &Snapshot) -> PaintResult<()> {
        if snapshot.width() != self.width() || snapshot.height() != self.height() {
            return Err(PaintError::SnapshotMismatch {
                width: self.width(),
                height: self.height(),
                got_width: snapshot.width(),
                got_height: snapshot.height(),
            });
        }
        Ok(())
    }

    /// Raw RGBA bytes, row-major, for blitting to a display surface.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Encode the current pixels as PNG.
    pub fn encode_png(&self) -> PaintResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        log::info!(
            "Encoded {}x{} canvas as PNG ({} bytes)",
            self.width(),
            self.height(),
            bytes.len()
        );
        Ok(bytes)
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
