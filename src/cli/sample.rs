//! Sample command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::RenderOptions;
use crate::error::{EmojiError, Result};
use crate::output::{display_path, Printer};
use crate::sample::Sampler;
use crate::types::Region;

/// Show the face colour sampled from a photo
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Photo file
    pub photo: PathBuf,

    /// Sample box on the working canvas as x,y,width,height
    #[arg(long, value_parser = parse_region)]
    pub region: Option<Region>,

    /// Posterize depth in bits per channel
    #[arg(long, default_value_t = RenderOptions::default().posterize_bits)]
    pub bits: u8,

    /// Print the colour as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SampleArgs, printer: &Printer) -> Result<()> {
    let bytes = fs::read(&args.photo).map_err(|e| EmojiError::Io {
        path: args.photo.clone(),
        message: format!("Failed to read photo: {}", e),
    })?;

    let sampler = Sampler::from_options(&RenderOptions {
        posterize_bits: args.bits,
        ..RenderOptions::default()
    });
    let colour = sampler.sample_bytes(&bytes, args.region)?;

    if args.json {
        let json = serde_json::json!({ "colour": colour, "region": args.region });
        println!("{}", json);
    } else {
        printer.info(
            "Sampled",
            &format!("{} {}", colour, printer.dim(&display_path(&args.photo))),
        );
    }

    Ok(())
}

fn parse_region(s: &str) -> std::result::Result<Region, String> {
    let parts: Vec<u32> = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("invalid region '{}': {}", s, e))?;

    match parts.as_slice() {
        [x, y, w, h] if *w > 0 && *h > 0 => Ok(Region::new(*x, *y, *w, *h)),
        [_, _, _, _] => Err("region width and height must be positive".to_string()),
        _ => Err(format!("expected x,y,width,height but got '{}'", s)),
    }
}
