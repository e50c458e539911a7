//! Animation module for emojigen.
//!
//! A static face is turned into a short blink-and-bounce loop and written
//! as GIF, WebP or APNG, degrading to a supported format when needed.

mod codec;
mod encode;
mod frames;

pub use codec::{AnimationFormat, CodecRegistry, FormatChoice, FALLBACK_CHAIN};
pub use encode::{encode_animation, encode_with, EncodedAnimation};
pub use frames::{bounce_offset, synthesize, Frame, FrameSequence};
