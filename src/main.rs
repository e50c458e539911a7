use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

use emojigen::cli::{Cli, Commands};
use emojigen::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let printer = Printer::new();

    match cli.command {
        Commands::Generate(args) => emojigen::cli::generate::run(args, &printer)?,
        Commands::Resolve(args) => emojigen::cli::resolve::run(args, &printer)?,
        Commands::Sample(args) => emojigen::cli::sample::run(args, &printer)?,
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` selects info and `-vv` debug.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "emojigen=info",
        _ => "emojigen=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
