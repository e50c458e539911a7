//! Rectangular sub-regions of an image.

use serde::Serialize;

/// A pixel-aligned bounding box: origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The middle box spanning 3/8..5/8 on both axes (a quarter of the area).
    pub fn centre_of(side: u32) -> Self {
        let start = side * 3 / 8;
        let end = side * 5 / 8;
        Self::new(start, start, (end - start).max(1), (end - start).max(1))
    }

    /// Clip this region to a `width` × `height` image, keeping at least one pixel.
    pub fn clamp_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width.saturating_sub(1));
        let y = self.y.min(height.saturating_sub(1));
        let w = self.width.clamp(1, width - x);
        let h = self.height.clamp(1, height - y);
        Self::new(x, y, w, h)
    }
}
