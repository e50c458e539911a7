//! The appearance model consumed by both renderers.

use serde::Serialize;

use crate::error::{EmojiError, Result};

use super::{Colour, Expression};

/// Largest canvas side accepted by the renderers.
///
/// GIF frames address at most `u16::MAX` pixels per side; this keeps every
/// format well inside that and bounds per-call allocations.
pub const MAX_SIZE: u32 = 4096;

/// Default canvas side in pixels.
pub const DEFAULT_SIZE: u32 = 256;

/// Base colour, expression and square canvas size.
///
/// Constructed through [`Appearance::new`], which rejects sizes outside
/// `1..=MAX_SIZE`; every renderer is total over values built this way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Appearance {
    pub colour: Colour,
    pub expression: Expression,
    size: u32,
}

impl Appearance {
    /// Create an appearance, validating the canvas size.
    pub fn new(colour: Colour, expression: Expression, size: u32) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            colour,
            expression,
            size,
        })
    }

    /// Canvas side in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Validate a requested canvas size.
pub fn check_size(size: u32) -> Result<()> {
    if size == 0 {
        return Err(EmojiError::InvalidParameter {
            message: "size must be positive".to_string(),
            help: Some(format!("Pick a size between 1 and {}", MAX_SIZE)),
        });
    }
    if size > MAX_SIZE {
        return Err(EmojiError::InvalidParameter {
            message: format!("size {} exceeds the maximum of {}", size, MAX_SIZE),
            help: None,
        });
    }
    Ok(())
}
