//! Looping animation encoders.

use gif::{DisposalMethod, Encoder, Repeat};
use tracing::{debug, warn};

use crate::error::{EmojiError, Result};

use super::codec::{AnimationFormat, CodecRegistry};
use super::frames::FrameSequence;

/// An encoded, infinitely looping animation.
#[derive(Debug, Clone)]
pub struct EncodedAnimation {
    pub bytes: Vec<u8>,
    /// Format actually written.
    pub format: AnimationFormat,
    /// Requested format, set when it was replaced by a fallback.
    pub fallback_from: Option<AnimationFormat>,
    pub frame_count: usize,
}

impl EncodedAnimation {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback_from.is_some()
    }
}

/// Encode `frames` as `requested`, substituting a fallback format when the
/// registry cannot produce it.
pub fn encode_animation(
    frames: &FrameSequence,
    requested: AnimationFormat,
    registry: &CodecRegistry,
) -> Result<EncodedAnimation> {
    let choice = registry.choose(requested)?;
    if let Some(original) = choice.fallback_from {
        warn!(
            requested = %original,
            fallback = %choice.format,
            "animation format unavailable, using fallback"
        );
    }

    let bytes = encode_with(frames, choice.format)?;
    debug!(
        format = %choice.format,
        frames = frames.len(),
        bytes = bytes.len(),
        "encoded animation"
    );

    Ok(EncodedAnimation {
        bytes,
        format: choice.format,
        fallback_from: choice.fallback_from,
        frame_count: frames.len(),
    })
}

/// Encode with one specific backend, without fallback.
pub fn encode_with(frames: &FrameSequence, format: AnimationFormat) -> Result<Vec<u8>> {
    if frames.is_empty() {
        return Err(EmojiError::invalid("cannot encode an empty animation"));
    }
    match format {
        AnimationFormat::Gif => encode_gif(frames),
        #[cfg(feature = "webp")]
        AnimationFormat::WebP => encode_webp(frames),
        #[cfg(feature = "apng")]
        AnimationFormat::Apng => encode_apng(frames),
        #[allow(unreachable_patterns)]
        _ => Err(EmojiError::UnsupportedFormat {
            format: format.to_string(),
        }),
    }
}

fn encode_gif(frames: &FrameSequence) -> Result<Vec<u8>> {
    let side = u16::try_from(frames.size())
        .map_err(|_| EmojiError::invalid(format!("{}px is too large for GIF", frames.size())))?;
    let mut output = Vec::new();

    {
        let mut encoder = Encoder::new(&mut output, side, side, &[])
            .map_err(|e| EmojiError::encode(format!("Failed to create GIF encoder: {}", e)))?;
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| EmojiError::encode(format!("Failed to set GIF repeat: {}", e)))?;

        for frame in frames.frames() {
            let mut rgba = frame.image.as_raw().clone();
            let mut gif_frame = gif::Frame::from_rgba_speed(side, side, &mut rgba, 10);
            // GIF delays are in centiseconds.
            gif_frame.delay = (frame.delay_ms / 10).max(1);
            gif_frame.dispose = DisposalMethod::Background;
            encoder
                .write_frame(&gif_frame)
                .map_err(|e| EmojiError::encode(format!("Failed to write GIF frame: {}", e)))?;
        }
    }

    Ok(output)
}

#[cfg(feature = "webp")]
fn encode_webp(frames: &FrameSequence) -> Result<Vec<u8>> {
    let webp_err =
        |e: webp_animation::Error| EmojiError::encode(format!("Failed to write WebP: {:?}", e));
    let mut encoder =
        webp_animation::Encoder::new((frames.size(), frames.size())).map_err(webp_err)?;

    // Timestamps are frame start times in milliseconds; loops forever by default.
    let mut timestamp: i32 = 0;
    for frame in frames.frames() {
        encoder
            .add_frame(frame.image.as_raw(), timestamp)
            .map_err(webp_err)?;
        timestamp = timestamp.saturating_add(i32::from(frame.delay_ms));
    }
    let data = encoder.finalize(timestamp).map_err(webp_err)?;

    Ok(data.to_vec())
}

#[cfg(feature = "apng")]
fn encode_apng(frames: &FrameSequence) -> Result<Vec<u8>> {
    let apng_err = |e: png::EncodingError| EmojiError::encode(format!("Failed to write APNG: {}", e));
    let count = u32::try_from(frames.len())
        .map_err(|_| EmojiError::invalid("too many frames for APNG"))?;
    let delay = frames.frames()[0].delay_ms;
    let mut output = Vec::new();

    {
        let mut encoder = png::Encoder::new(&mut output, frames.size(), frames.size());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        // Zero plays loops forever.
        encoder.set_animated(count, 0).map_err(apng_err)?;
        encoder.set_frame_delay(delay, 1000).map_err(apng_err)?;
        encoder
            .set_dispose_op(png::DisposeOp::Background)
            .map_err(apng_err)?;

        let mut writer = encoder.write_header().map_err(apng_err)?;
        for frame in frames.frames() {
            writer
                .write_image_data(frame.image.as_raw())
                .map_err(apng_err)?;
        }
        writer.finish().map_err(apng_err)?;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animate::frames::synthesize;
    use crate::config::RenderOptions;
    use crate::types::{Appearance, Colour, Expression};
    use image::codecs::gif::GifDecoder;
    use image::AnimationDecoder;
    use std::io::Cursor;
    use std::time::Duration;

    fn sequence(frames: u32) -> FrameSequence {
        let a = Appearance::new(Colour::DEFAULT_YELLOW, Expression::Tongue, 48).unwrap();
        let opts = RenderOptions {
            frames,
            ..RenderOptions::with_size(48)
        };
        synthesize(&a, &opts).unwrap()
    }

    fn gif_frames(bytes: &[u8]) -> Vec<image::Frame> {
        GifDecoder::new(Cursor::new(bytes))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap()
    }

    #[test]
    fn test_gif_frame_count_and_delay() {
        let out = encode_animation(&sequence(6), AnimationFormat::Gif, &CodecRegistry::all()).unwrap();
        assert_eq!(out.format, AnimationFormat::Gif);
        assert!(!out.is_fallback());
        assert_eq!(&out.bytes[..6], b"GIF89a");

        let decoded = gif_frames(&out.bytes);
        assert_eq!(decoded.len(), 6);
        for frame in &decoded {
            assert_eq!(frame.buffer().dimensions(), (48, 48));
            assert_eq!(Duration::from(frame.delay()), Duration::from_millis(80));
        }
    }

    #[test]
    fn test_disabled_webp_returns_gif() {
        let registry = CodecRegistry::all().with_encode(AnimationFormat::WebP, false);
        let out = encode_animation(&sequence(4), AnimationFormat::WebP, &registry).unwrap();
        assert_eq!(out.format, AnimationFormat::Gif);
        assert_eq!(out.fallback_from, Some(AnimationFormat::WebP));
        assert_eq!(out.mime_type(), "image/gif");
        assert_eq!(gif_frames(&out.bytes).len(), 4);
    }

    #[cfg(not(feature = "webp"))]
    #[test]
    fn test_encode_with_webp_is_unsupported() {
        let err = encode_with(&sequence(2), AnimationFormat::WebP).unwrap_err();
        assert!(matches!(err, EmojiError::UnsupportedFormat { .. }));
    }

    #[cfg(feature = "webp")]
    #[test]
    fn test_webp_frame_count_and_delay() {
        use image::codecs::webp::WebPDecoder;

        // Four frames: every neighbouring pair differs, so none are merged.
        let out = encode_animation(&sequence(4), AnimationFormat::WebP, &CodecRegistry::all()).unwrap();
        assert_eq!(out.format, AnimationFormat::WebP);
        assert!(!out.is_fallback());
        assert_eq!(&out.bytes[..4], b"RIFF");
        assert_eq!(&out.bytes[8..12], b"WEBP");

        let decoder = WebPDecoder::new(Cursor::new(&out.bytes)).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 4);
        for frame in &frames {
            assert_eq!(frame.buffer().dimensions(), (48, 48));
            assert_eq!(Duration::from(frame.delay()), Duration::from_millis(80));
        }
    }

    #[cfg(feature = "apng")]
    #[test]
    fn test_apng_frame_count() {
        use image::codecs::png::PngDecoder;

        let out = encode_animation(&sequence(5), AnimationFormat::Apng, &CodecRegistry::all()).unwrap();
        assert_eq!(out.format, AnimationFormat::Apng);
        assert_eq!(&out.bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoder = PngDecoder::new(Cursor::new(&out.bytes)).unwrap();
        assert!(decoder.is_apng().unwrap());
        let frames = decoder.apng().unwrap().into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0].buffer().dimensions(), (48, 48));
    }

    #[test]
    fn test_disabled_apng_falls_back_to_gif() {
        let registry = CodecRegistry::all().with_encode(AnimationFormat::Apng, false);
        let out = encode_animation(&sequence(3), AnimationFormat::Apng, &registry).unwrap();
        assert_eq!(out.format, AnimationFormat::Gif);
        assert_eq!(out.frame_count, 3);
        assert_eq!(gif_frames(&out.bytes).len(), 3);
    }
}
