use crate::color::Rgba;
use crate::error::PaintResult;
use crate::pixel_buffer::PixelBuffer;

/// Bucket fill of the 4-connected region under `(x0, y0)`.
///
/// Only pixels exactly equal (all four channels) to the seed pixel are
/// replaced, so antialiased edges stop the fill. Returns the number of pixels
/// painted; filling with the color already under the seed paints nothing.
///
/// Works off an explicit stack and a one-byte-per-pixel visited map, so large
/// regions cannot overflow the call stack and every pixel is painted at most
/// once.
pub fn flood_fill(buffer: &mut PixelBuffer, x0: i64, y0: i64, fill: Rgba) -> PaintResult<usize> {
    let target = buffer.get_pixel(x0, y0)?;
    if target == fill {
        log::debug!("Fill at ({x0}, {y0}) skipped, region already has color {:?}", fill.0);
        return Ok(0);
    }

    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let data = buffer.as_raw_mut();
    let mut visited = vec![0u8; width * height];
    let mut stack = vec![(x0 as usize, y0 as usize)];
    let mut painted = 0;

    while let Some((x, y)) = stack.pop() {
        let index = y * width + x;
        if visited[index] != 0 {
            continue;
        }
        let offset = index * 4;
        if data[offset..offset + 4] != target.0 {
            continue;
        }

        visited[index] = 1;
        data[offset..offset + 4].copy_from_slice(&fill.0);
        painted += 1;

        if x + 1 < width && visited[index + 1] == 0 {
            stack.push((x + 1, y));
        }
        if x > 0 && visited[index - 1] == 0 {
            stack.push((x - 1, y));
        }
        if y + 1 < height && visited[index + width] == 0 {
            stack.push((x, y + 1));
        }
        if y > 0 && visited[index - width] == 0 {
            stack.push((x, y - 1));
        }
    }

    log::debug!("Filled {painted} pixels from ({x0}, {y0}) with {:?}", fill.0);
    Ok(painted)
}
