//! Frame synthesis: blink plus vertical bounce.

use std::f64::consts::PI;

use image::imageops;
use image::RgbaImage;

use crate::config::RenderOptions;
use crate::error::{EmojiError, Result};
use crate::render::{render_bitmap, render_primitives, FaceGeometry};
use crate::types::Appearance;

/// One bitmap of an animation and how long it stays on screen.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbaImage,
    pub delay_ms: u16,
    /// Whether the eyes are closed on this frame.
    pub blink: bool,
    /// Vertical displacement applied, positive is down.
    pub offset: i32,
}

/// Ordered frames of equal dimensions.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    size: u32,
    frames: Vec<Frame>,
}

impl FrameSequence {
    /// Side length shared by every frame.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Indices of frames showing closed eyes.
    pub fn blink_indices(&self) -> Vec<usize> {
        self.frames
            .iter()
            .enumerate()
            .filter(|(_, f)| f.blink)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Bounce displacement for frame `index` of `count`: one sine period per loop.
pub fn bounce_offset(index: u32, count: u32, amplitude: u32) -> i32 {
    let phase = 2.0 * PI * f64::from(index) / f64::from(count.max(1));
    (f64::from(amplitude) * phase.sin()).round() as i32
}

/// Render `appearance` once and derive `opts.frames` animation frames.
///
/// The last frame closes both eyes. Every frame is shifted vertically on a
/// canvas padded by `bounce_px` (at most `size`) above and below, then
/// cropped back.
pub fn synthesize(appearance: &Appearance, opts: &RenderOptions) -> Result<FrameSequence> {
    if opts.frames == 0 {
        return Err(EmojiError::invalid("frame count must be positive"));
    }

    let size = appearance.size();
    let pad = opts.bounce_px.min(size);
    let base = render_bitmap(appearance);
    let closed = render_primitives(size, &FaceGeometry::blink(appearance));

    let frames = (0..opts.frames)
        .map(|i| {
            let blink = i == opts.frames - 1;
            let face = if blink { &closed } else { &base };

            let offset = bounce_offset(i, opts.frames, pad);
            let mut canvas = RgbaImage::new(size, size + 2 * pad);
            imageops::replace(&mut canvas, face, 0, i64::from(offset) + i64::from(pad));
            let image = imageops::crop_imm(&canvas, 0, pad, size, size).to_image();

            Frame {
                image,
                delay_ms: opts.frame_delay_ms,
                blink,
                offset,
            }
        })
        .collect();

    Ok(FrameSequence { size, frames })
}
