//! Animation codec capabilities and format fallback.
//!
//! Compile-time features decide which encoders are *available*; a
//! [`CodecRegistry`] decides which of those are *enabled* for a call.

use std::fmt;

use crate::error::{EmojiError, Result};

/// Looping animation container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationFormat {
    Gif,
    WebP,
    Apng,
}

/// Substitutes tried, in order, when the requested format is unavailable.
pub const FALLBACK_CHAIN: [AnimationFormat; 2] = [AnimationFormat::Gif, AnimationFormat::Apng];

impl AnimationFormat {
    pub const ALL: [AnimationFormat; 3] = [
        AnimationFormat::Gif,
        AnimationFormat::WebP,
        AnimationFormat::Apng,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnimationFormat::Gif => "gif",
            AnimationFormat::WebP => "webp",
            AnimationFormat::Apng => "apng",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            AnimationFormat::Gif => "image/gif",
            AnimationFormat::WebP => "image/webp",
            AnimationFormat::Apng => "image/png",
        }
    }

    /// File extension used when saving.
    pub fn extension(self) -> &'static str {
        match self {
            AnimationFormat::Gif => "gif",
            AnimationFormat::WebP => "webp",
            AnimationFormat::Apng => "png",
        }
    }

    /// Whether an encoder for this format is compiled in.
    pub fn is_compiled(self) -> bool {
        match self {
            AnimationFormat::Gif => true,
            #[cfg(feature = "webp")]
            AnimationFormat::WebP => true,
            #[cfg(not(feature = "webp"))]
            AnimationFormat::WebP => false,
            #[cfg(feature = "apng")]
            AnimationFormat::Apng => true,
            #[cfg(not(feature = "apng"))]
            AnimationFormat::Apng => false,
        }
    }
}

impl fmt::Display for AnimationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The format an animation will actually be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatChoice {
    pub format: AnimationFormat,
    /// The originally requested format, when it had to be replaced.
    pub fallback_from: Option<AnimationFormat>,
}

/// Runtime codec switchboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecRegistry {
    disabled: Vec<AnimationFormat>,
}

impl CodecRegistry {
    /// All compiled-in encoders enabled.
    pub fn all() -> Self {
        Self {
            disabled: Vec::new(),
        }
    }

    /// Enable or disable encoding for a format.
    pub fn with_encode(mut self, format: AnimationFormat, enabled: bool) -> Self {
        self.disabled.retain(|&f| f != format);
        if !enabled {
            self.disabled.push(format);
        }
        self
    }

    /// Is this format compiled in AND enabled?
    pub fn can_encode(&self, format: AnimationFormat) -> bool {
        format.is_compiled() && !self.disabled.contains(&format)
    }

    /// Formats that can currently be produced.
    pub fn encodable_formats(&self) -> impl Iterator<Item = AnimationFormat> + '_ {
        AnimationFormat::ALL
            .into_iter()
            .filter(move |&f| self.can_encode(f))
    }

    /// Pick `requested` if possible, else the first encodable entry of
    /// [`FALLBACK_CHAIN`].
    ///
    /// Only fails when every fallback has been disabled.
    pub fn choose(&self, requested: AnimationFormat) -> Result<FormatChoice> {
        if self.can_encode(requested) {
            return Ok(FormatChoice {
                format: requested,
                fallback_from: None,
            });
        }
        FALLBACK_CHAIN
            .into_iter()
            .find(|&f| self.can_encode(f))
            .map(|format| FormatChoice {
                format,
                fallback_from: Some(requested),
            })
            .ok_or_else(|| EmojiError::UnsupportedFormat {
                format: requested.to_string(),
            })
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gif_always_available() {
        assert!(CodecRegistry::all().can_encode(AnimationFormat::Gif));
    }

    #[test]
    fn test_disabled_webp_falls_back_to_gif() {
        let registry = CodecRegistry::all().with_encode(AnimationFormat::WebP, false);
        let choice = registry.choose(AnimationFormat::WebP).unwrap();
        assert_eq!(
            choice,
            FormatChoice {
                format: AnimationFormat::Gif,
                fallback_from: Some(AnimationFormat::WebP),
            }
        );
    }

    #[cfg(feature = "webp")]
    #[test]
    fn test_webp_honoured_when_compiled() {
        let choice = CodecRegistry::all().choose(AnimationFormat::WebP).unwrap();
        assert_eq!(choice.format, AnimationFormat::WebP);
        assert_eq!(choice.fallback_from, None);
    }

    #[cfg(feature = "apng")]
    #[test]
    fn test_apng_honoured_when_enabled() {
        let choice = CodecRegistry::all().choose(AnimationFormat::Apng).unwrap();
        assert_eq!(choice.format, AnimationFormat::Apng);
        assert_eq!(choice.fallback_from, None);
    }

    #[test]
    fn test_disabled_format_falls_back() {
        let registry = CodecRegistry::all().with_encode(AnimationFormat::Apng, false);
        let choice = registry.choose(AnimationFormat::Apng).unwrap();
        assert_eq!(choice.format, AnimationFormat::Gif);
    }

    #[cfg(feature = "apng")]
    #[test]
    fn test_gif_disabled_uses_next_in_chain() {
        let registry = CodecRegistry::all()
            .with_encode(AnimationFormat::Gif, false)
            .with_encode(AnimationFormat::WebP, false);
        let choice = registry.choose(AnimationFormat::WebP).unwrap();
        assert_eq!(choice.format, AnimationFormat::Apng);
    }

    #[test]
    fn test_everything_disabled_is_unsupported() {
        let registry = AnimationFormat::ALL
            .into_iter()
            .fold(CodecRegistry::all(), |r, f| r.with_encode(f, false));
        assert!(matches!(
            registry.choose(AnimationFormat::Gif),
            Err(EmojiError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_reenable_format() {
        let registry = CodecRegistry::all()
            .with_encode(AnimationFormat::Gif, false)
            .with_encode(AnimationFormat::Gif, true);
        assert!(registry.can_encode(AnimationFormat::Gif));
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(AnimationFormat::Apng.mime_type(), "image/png");
        assert_eq!(AnimationFormat::WebP.mime_type(), "image/webp");
    }

    #[test]
    fn test_encodable_formats_follow_features() {
        let formats: Vec<_> = CodecRegistry::all().encodable_formats().collect();
        assert!(formats.contains(&AnimationFormat::Gif));
        assert_eq!(formats.contains(&AnimationFormat::WebP), cfg!(feature = "webp"));
        assert_eq!(formats.contains(&AnimationFormat::Apng), cfg!(feature = "apng"));
    }
}
