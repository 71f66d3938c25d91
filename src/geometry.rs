use serde::{Deserialize, Serialize};

/// A canvas position in whole pixels. Pixel `(x, y)` is sampled at this
/// exact point, so geometry and pixel indices share one coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Inclusive pixel box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl PixelBox {
    /// Box spanned by two opposite corners in either drag direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn expand(self, by: i64) -> Self {
        Self {
            min_x: self.min_x - by,
            min_y: self.min_y - by,
            max_x: self.max_x + by,
            max_y: self.max_y + by,
        }
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Intersection with a `width x height` canvas, or `None` if disjoint.
    pub fn clip(self, width: u32, height: u32) -> Option<Self> {
        let clipped = Self {
            min_x: self.min_x.max(0),
            min_y: self.min_y.max(0),
            max_x: self.max_x.min(width as i64 - 1),
            max_y: self.max_y.min(height as i64 - 1),
        };
        (clipped.min_x <= clipped.max_x && clipped.min_y <= clipped.max_y).then_some(clipped)
    }
}

/// Distance from `(px, py)` to the segment `a`-`b`.
pub fn distance_to_segment(px: f32, py: f32, a: Point, b: Point) -> f32 {
    let (ax, ay) = (a.x as f32, a.y as f32);
    let (dx, dy) = (b.x as f32 - ax, b.y as f32 - ay);
    let (vx, vy) = (px - ax, py - ay);

    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return (vx * vx + vy * vy).sqrt();
    }

    let t = ((vx * dx + vy * dy) / len_sq).clamp(0.0, 1.0);
    let (cx, cy) = (ax + dx * t, ay + dy * t);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}
