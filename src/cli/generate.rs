//! Generate command implementation.
//!
//! Reads a photo or takes a prompt and writes the encoded face to disk.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::animate::CodecRegistry;
use crate::config::RenderOptions;
use crate::error::{EmojiError, Result};
use crate::generate::{generate, EncodedImage, GenerateRequest, OutputKind};
use crate::output::{display_path, Printer};

/// Render a face from a photo or a prompt
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Photo to sample the face colour from (takes precedence over --prompt)
    #[arg(long)]
    pub photo: Option<PathBuf>,

    /// Text describing the face, e.g. "happy blue" or "wink ;)"
    #[arg(long)]
    pub prompt: Option<String>,

    /// Output type: png, svg, gif, webp, or apng
    #[arg(long, short = 't', default_value = "png")]
    pub out_type: OutputKind,

    /// Output file (default: emoji.<ext> in the current directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Canvas side in pixels
    #[arg(long, default_value_t = RenderOptions::default().size)]
    pub size: u32,

    /// Number of animation frames
    #[arg(long, default_value_t = RenderOptions::default().frames)]
    pub frames: u32,

    /// Display time of each animation frame in milliseconds
    #[arg(long, default_value_t = RenderOptions::default().frame_delay_ms)]
    pub delay: u16,
}

impl GenerateArgs {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            size: self.size,
            frames: self.frames,
            frame_delay_ms: self.delay,
            ..RenderOptions::default()
        }
    }
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let photo = match &args.photo {
        Some(path) => Some(fs::read(path).map_err(|e| EmojiError::Io {
            path: path.clone(),
            message: format!("Failed to read photo: {}", e),
        })?),
        None => None,
    };

    let described = match (&args.photo, &args.prompt) {
        (Some(path), _) => format!("photo {}", display_path(path)),
        (None, Some(prompt)) => format!("prompt \"{}\"", prompt),
        (None, None) => String::new(),
    };

    let request = GenerateRequest {
        photo,
        prompt: args.prompt.clone(),
        output: args.out_type,
        options: args.options(),
    };

    if !described.is_empty() {
        printer.status(
            "Rendering",
            &format!("{} {}", described, printer.dim(&format!("({}x{})", args.size, args.size))),
        );
    }

    let encoded = generate(&request, &CodecRegistry::all())?;
    let path = write_output(&args, &encoded)?;

    if let Some(requested) = encoded.fallback_from {
        printer.warning(
            "Fallback",
            &format!("{} is unavailable, wrote {} instead", requested, encoded.mime_type),
        );
    }
    printer.status("Wrote", &display_path(&path));

    Ok(())
}

fn write_output(args: &GenerateArgs, encoded: &EncodedImage) -> Result<PathBuf> {
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("emoji.{}", encoded.extension)));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| EmojiError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    fs::write(&path, &encoded.bytes).map_err(|e| EmojiError::Io {
        path: path.clone(),
        message: format!("Failed to write output: {}", e),
    })?;

    Ok(path)
}
