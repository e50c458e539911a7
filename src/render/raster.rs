//! Raster backend: paints primitives into an RGBA bitmap.
//!
//! Coverage is estimated with a 4×4 grid of samples per pixel and blended
//! source-over, so edges are anti-aliased while fully covered pixels get
//! the exact paint colour.

use image::{Rgba, RgbaImage};

use crate::types::{Appearance, Colour};

use super::geometry::{render_with, Primitive, Surface};

/// Samples per axis inside one pixel.
const SUBSAMPLES: u32 = 4;

/// Bitmap surface with a transparent background.
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Fresh transparent canvas.
    pub fn new(size: u32) -> Self {
        Self {
            image: RgbaImage::new(size, size),
        }
    }
}

impl Surface for RasterSurface {
    type Output = RgbaImage;

    fn draw(&mut self, primitive: &Primitive) {
        let colour = primitive.colour();
        if colour.is_transparent() {
            return;
        }

        let (width, height) = self.image.dimensions();
        let (min_x, min_y, max_x, max_y) = primitive.bounds();
        let x0 = min_x.floor().max(0.0) as u32;
        let y0 = min_y.floor().max(0.0) as u32;
        let x1 = (max_x.ceil().max(0.0) as u32).min(width);
        let y1 = (max_y.ceil().max(0.0) as u32).min(height);

        let samples = (SUBSAMPLES * SUBSAMPLES) as f32;
        for y in y0..y1 {
            for x in x0..x1 {
                let hits = coverage(primitive, x, y);
                if hits == 0 {
                    continue;
                }
                let alpha = f32::from(colour.a) / 255.0 * hits as f32 / samples;
                let dst = self.image.get_pixel_mut(x, y);
                *dst = blend(*dst, colour, alpha);
            }
        }
    }

    fn finish(self) -> RgbaImage {
        self.image
    }
}

/// Number of sub-pixel samples of pixel `(x, y)` inside the primitive.
fn coverage(primitive: &Primitive, x: u32, y: u32) -> u32 {
    let step = 1.0 / SUBSAMPLES as f32;
    let mut hits = 0;
    for sy in 0..SUBSAMPLES {
        for sx in 0..SUBSAMPLES {
            let px = x as f32 + (sx as f32 + 0.5) * step;
            let py = y as f32 + (sy as f32 + 0.5) * step;
            if primitive.contains(px, py) {
                hits += 1;
            }
        }
    }
    hits
}

/// Source-over composite of `src` at `alpha` onto straight-alpha `dst`.
fn blend(dst: Rgba<u8>, src: Colour, alpha: f32) -> Rgba<u8> {
    if alpha >= 1.0 {
        return Rgba(src.to_rgba());
    }
    let [dr, dg, db, da] = dst.0;
    let da = f32::from(da) / 255.0;
    let out_a = alpha + da * (1.0 - alpha);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mix = |s: u8, d: u8| -> u8 {
        let v = (f32::from(s) * alpha + f32::from(d) * da * (1.0 - alpha)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        mix(src.r, dr),
        mix(src.g, dg),
        mix(src.b, db),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Render `appearance` to a `size` × `size` bitmap.
pub fn render_bitmap(appearance: &Appearance) -> RgbaImage {
    render_with(RasterSurface::new(appearance.size()), appearance)
}

/// Paint a primitive list onto a fresh `size` × `size` canvas.
pub fn render_primitives(size: u32, primitives: &[Primitive]) -> RgbaImage {
    let mut surface = RasterSurface::new(size);
    for primitive in primitives {
        surface.draw(primitive);
    }
    surface.finish()
}
