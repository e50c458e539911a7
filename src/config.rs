//! Render options shared by the core entry points and the CLI.

use serde::{Deserialize, Serialize};

use crate::error::{EmojiError, Result};
use crate::types::{check_size, DEFAULT_SIZE, MAX_SIZE};

/// Longest animation loop accepted.
pub const MAX_FRAMES: u32 = 120;

/// Tunable knobs for a single generation call.
///
/// Every field has a default matching the classic emoji look; callers
/// override what they need with struct update syntax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Canvas side in pixels.
    pub size: u32,

    /// Number of animation frames.
    pub frames: u32,

    /// Display duration of each animation frame.
    pub frame_delay_ms: u16,

    /// Peak vertical displacement of the bounce, in pixels. Capped at the
    /// canvas size when frames are synthesized.
    pub bounce_px: u32,

    /// Bits per channel kept when posterizing sampled photos (1..=8).
    pub posterize_bits: u8,

    /// Side of the square a photo is resized to before sampling.
    pub working_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            frames: 6,
            frame_delay_ms: 80,
            bounce_px: 6,
            posterize_bits: 3,
            working_size: 256,
        }
    }
}

impl RenderOptions {
    /// Options with a different canvas size.
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Check every field, reporting the first bad one.
    pub fn validate(&self) -> Result<()> {
        check_size(self.size)?;
        if self.frames == 0 {
            return Err(EmojiError::InvalidParameter {
                message: "frame count must be positive".to_string(),
                help: Some("The default loop uses 6 frames".to_string()),
            });
        }
        if self.frames > MAX_FRAMES {
            return Err(EmojiError::InvalidParameter {
                message: format!("{} frames is too many", self.frames),
                help: Some(format!("Use at most {} frames", MAX_FRAMES)),
            });
        }
        if self.frame_delay_ms == 0 {
            return Err(EmojiError::invalid("frame delay must be positive"));
        }
        if self.working_size < 8 {
            return Err(EmojiError::invalid(format!(
                "working size {} is too small to sample",
                self.working_size
            )));
        }
        if self.working_size > MAX_SIZE {
            return Err(EmojiError::invalid(format!(
                "working size {} exceeds the {}px limit",
                self.working_size, MAX_SIZE
            )));
        }
        if self.bounce_px > MAX_SIZE {
            return Err(EmojiError::invalid(format!(
                "bounce of {}px exceeds the {}px limit",
                self.bounce_px, MAX_SIZE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = RenderOptions::default();
        assert_eq!(opts.size, 256);
        assert_eq!(opts.frames, 6);
        assert_eq!(opts.frame_delay_ms, 80);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_frames() {
        let opts = RenderOptions {
            frames: 0,
            ..RenderOptions::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(EmojiError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        assert!(RenderOptions::with_size(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_huge_bounce() {
        let opts = RenderOptions {
            bounce_px: u32::MAX,
            ..RenderOptions::with_size(32)
        };
        assert!(matches!(
            opts.validate(),
            Err(EmojiError::InvalidParameter { .. })
        ));
        // The default bounce is fine even on canvases smaller than it.
        assert!(RenderOptions::with_size(4).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_huge_working_size() {
        let opts = RenderOptions {
            working_size: 1_000_000,
            ..RenderOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_too_many_frames() {
        let opts = RenderOptions {
            frames: MAX_FRAMES + 1,
            ..RenderOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let opts: RenderOptions = serde_json::from_str(r#"{"size": 64}"#).unwrap();
        assert_eq!(opts.size, 64);
        assert_eq!(opts.frames, 6);
    }
}
