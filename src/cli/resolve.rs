//! Resolve command implementation.
//!
//! Prints the colour and expression a prompt maps to without rendering.

use clap::Args;

use crate::error::{EmojiError, Result};
use crate::output::Printer;
use crate::types::DEFAULT_SIZE;

/// Show the colour and expression a prompt maps to
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Prompt text
    pub prompt: String,

    /// Canvas side recorded in the appearance
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: u32,

    /// Print the appearance as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ResolveArgs, printer: &Printer) -> Result<()> {
    let appearance = crate::resolve::resolve(&args.prompt, args.size)?;

    if args.json {
        let json = serde_json::to_string_pretty(&appearance)
            .map_err(|e| EmojiError::encode(format!("Failed to serialize appearance: {}", e)))?;
        println!("{}", json);
    } else {
        printer.info("Colour", &appearance.colour.to_string());
        printer.info("Expression", appearance.expression.name());
    }

    Ok(())
}
