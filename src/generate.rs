//! Generation entry points.
//!
//! Each call is a self-contained pipeline: input bytes or text go in,
//! an encoded buffer or SVG string comes out. Nothing is cached or shared
//! between calls.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use tracing::info;

use crate::animate::{encode_animation, synthesize, AnimationFormat, CodecRegistry, EncodedAnimation};
use crate::config::RenderOptions;
use crate::error::{EmojiError, Result};
use crate::render::{encode_png, render_bitmap, render_svg};
use crate::resolve::resolve;
use crate::sample::Sampler;
use crate::types::{check_size, Appearance, Expression};

/// A static face, as a bitmap or as SVG markup.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Bitmap(RgbaImage),
    Vector(String),
}

impl Rendered {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Rendered::Bitmap(_) => "image/png",
            Rendered::Vector(_) => "image/svg+xml",
        }
    }

    /// PNG bytes for bitmaps, UTF-8 markup for vectors.
    pub fn encode(self) -> Result<EncodedImage> {
        match self {
            Rendered::Bitmap(image) => Ok(EncodedImage {
                bytes: encode_png(&image)?,
                mime_type: "image/png",
                extension: "png",
                fallback_from: None,
            }),
            Rendered::Vector(svg) => Ok(EncodedImage {
                bytes: svg.into_bytes(),
                mime_type: "image/svg+xml",
                extension: "svg",
                fallback_from: None,
            }),
        }
    }
}

/// Final output buffer plus what a transport layer needs to label it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub extension: &'static str,
    /// Set when an animation was written in a substitute format.
    pub fallback_from: Option<AnimationFormat>,
}

impl From<EncodedAnimation> for EncodedImage {
    fn from(anim: EncodedAnimation) -> Self {
        Self {
            mime_type: anim.format.mime_type(),
            extension: anim.format.extension(),
            fallback_from: anim.fallback_from,
            bytes: anim.bytes,
        }
    }
}

/// Where a face's appearance comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    /// Encoded photo bytes; the face colour is sampled and it always smiles.
    Photo(&'a [u8]),
    /// Free-text description.
    Prompt(&'a str),
}

impl Source<'_> {
    /// Resolve this source into an appearance.
    pub fn appearance(&self, opts: &RenderOptions) -> Result<Appearance> {
        check_size(opts.size)?;
        match *self {
            Source::Photo(bytes) => {
                let colour = Sampler::from_options(opts).sample_bytes(bytes, None)?;
                Appearance::new(colour, Expression::Smile, opts.size)
            }
            Source::Prompt(text) => resolve(text, opts.size),
        }
    }
}

fn render_static(appearance: &Appearance, want_vector: bool) -> Rendered {
    if want_vector {
        Rendered::Vector(render_svg(appearance))
    } else {
        Rendered::Bitmap(render_bitmap(appearance))
    }
}

/// Photo in, smiling face out.
pub fn render_from_photo(bytes: &[u8], size: u32, want_vector: bool) -> Result<Rendered> {
    let appearance = Source::Photo(bytes).appearance(&RenderOptions::with_size(size))?;
    Ok(render_static(&appearance, want_vector))
}

/// Prompt in, matching face out.
pub fn render_from_prompt(text: &str, size: u32, want_vector: bool) -> Result<Rendered> {
    let appearance = Source::Prompt(text).appearance(&RenderOptions::with_size(size))?;
    Ok(render_static(&appearance, want_vector))
}

/// Looping blink-and-bounce animation with default timing.
///
/// An unavailable `format` is replaced by a supported one; check
/// [`EncodedAnimation::format`] for what was written.
pub fn render_animation(
    source: Source<'_>,
    frame_count: u32,
    size: u32,
    format: AnimationFormat,
) -> Result<EncodedAnimation> {
    let opts = RenderOptions {
        frames: frame_count,
        ..RenderOptions::with_size(size)
    };
    render_animation_with(source, format, &opts, &CodecRegistry::all())
}

/// [`render_animation`] with explicit options and codec registry.
pub fn render_animation_with(
    source: Source<'_>,
    format: AnimationFormat,
    opts: &RenderOptions,
    registry: &CodecRegistry,
) -> Result<EncodedAnimation> {
    opts.validate()?;
    let appearance = source.appearance(opts)?;
    let frames = synthesize(&appearance, opts)?;
    encode_animation(&frames, format, registry)
}

/// Requested output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputKind {
    #[default]
    Png,
    Svg,
    Gif,
    WebP,
    Apng,
}

impl OutputKind {
    pub const ALL: [OutputKind; 5] = [
        OutputKind::Png,
        OutputKind::Svg,
        OutputKind::Gif,
        OutputKind::WebP,
        OutputKind::Apng,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputKind::Png => "png",
            OutputKind::Svg => "svg",
            OutputKind::Gif => "gif",
            OutputKind::WebP => "webp",
            OutputKind::Apng => "apng",
        }
    }

    /// The animation container for animated kinds.
    pub fn animation_format(self) -> Option<AnimationFormat> {
        match self {
            OutputKind::Png | OutputKind::Svg => None,
            OutputKind::Gif => Some(AnimationFormat::Gif),
            OutputKind::WebP => Some(AnimationFormat::WebP),
            OutputKind::Apng => Some(AnimationFormat::Apng),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputKind {
    type Err = EmojiError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        OutputKind::ALL
            .into_iter()
            .find(|k| k.name() == needle)
            .ok_or_else(|| EmojiError::InvalidParameter {
                message: format!("Unknown output type: {}", s),
                help: Some("Use png, svg, gif, webp, or apng".to_string()),
            })
    }
}

/// Everything a caller collected for one face: an optional photo, an
/// optional prompt, and the wanted output.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub photo: Option<Vec<u8>>,
    pub prompt: Option<String>,
    pub output: OutputKind,
    pub options: RenderOptions,
}

impl GenerateRequest {
    /// The photo if one was supplied, else a non-blank prompt.
    pub fn source(&self) -> Result<Source<'_>> {
        if let Some(photo) = self.photo.as_deref().filter(|p| !p.is_empty()) {
            return Ok(Source::Photo(photo));
        }
        match self.prompt.as_deref() {
            Some(text) if !text.trim().is_empty() => Ok(Source::Prompt(text)),
            _ => Err(EmojiError::EmptyInput),
        }
    }
}

/// Produce the encoded output for a request.
pub fn generate(request: &GenerateRequest, registry: &CodecRegistry) -> Result<EncodedImage> {
    let source = request.source()?;
    request.options.validate()?;

    let encoded: EncodedImage = match request.output.animation_format() {
        Some(format) => render_animation_with(source, format, &request.options, registry)?.into(),
        None => {
            let appearance = source.appearance(&request.options)?;
            render_static(&appearance, request.output == OutputKind::Svg).encode()?
        }
    };

    info!(
        output = %request.output,
        mime = encoded.mime_type,
        bytes = encoded.bytes.len(),
        "generated emoji"
    );
    Ok(encoded)
}
