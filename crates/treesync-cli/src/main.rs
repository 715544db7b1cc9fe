//! treesync CLI
//!
//! Replicates a source directory tree into a destination, copying only the
//! files that are missing or whose content changed.

mod cli;
mod error;
mod logging;
mod render;

use clap::Parser;
use colored::Colorize;
use treesync_core::TreeReplicator;

use cli::Cli;
use error::Result;
use render::TextRenderer;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }

    let options = cli.replicate_options()?;
    tracing::debug!("Options: {:?}", options);

    let mut replicator = TreeReplicator::with_options(options.clone());
    if !cli.json {
        replicator = replicator.observer(TextRenderer::new(cli.verbose, options.dry_run));
    }

    let result = replicator.replicate(&cli.src, &cli.dst)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
