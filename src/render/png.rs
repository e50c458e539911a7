//! PNG output for rendered faces.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::{EmojiError, Result};

/// Encode a bitmap as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| EmojiError::encode(format!("Failed to write PNG: {}", e)))?;
    Ok(out.into_inner())
}
