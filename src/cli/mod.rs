pub mod generate;
pub mod resolve;
pub mod sample;

use clap::{ArgAction, Parser, Subcommand};

/// emojigen - render emoji faces from photos or prompts
#[derive(Parser, Debug)]
#[command(name = "emojigen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a face from a photo or a prompt
    Generate(generate::GenerateArgs),

    /// Show the colour and expression a prompt maps to
    Resolve(resolve::ResolveArgs),

    /// Show the face colour sampled from a photo
    Sample(sample::SampleArgs),
}
