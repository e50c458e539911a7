//! emojigen - stylised emoji face generator
//!
//! A library for turning a photo or a short text prompt into a round
//! emoji face, written as PNG, SVG, or a looping GIF/APNG animation.

pub mod animate;
pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod render;
pub mod resolve;
pub mod sample;
pub mod types;

pub use animate::{
    encode_animation, synthesize, AnimationFormat, CodecRegistry, EncodedAnimation, FrameSequence,
};
pub use config::{RenderOptions, MAX_FRAMES};
pub use error::{EmojiError, Result};
pub use generate::{
    generate, render_animation, render_animation_with, render_from_photo, render_from_prompt,
    EncodedImage, GenerateRequest, OutputKind, Rendered, Source,
};
pub use render::{render_bitmap, render_svg, FaceGeometry, Primitive, Surface};
pub use resolve::resolve;
pub use sample::Sampler;
pub use types::{Appearance, Colour, Expression, Region, MAX_SIZE};
