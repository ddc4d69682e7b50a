//! labdoc CLI - Lab manual renderer.
//!
//! Provides commands for:
//! - `render`: Render one lab manual to PDF or HTML
//! - `batch`: Render every lab manual in a directory
//! - `new`: Write a starter lab manual

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BatchArgs, NewArgs, RenderArgs};
use output::Output;

/// labdoc - Render Markdown lab manuals into fillable worksheets.
#[derive(Parser)]
#[command(name = "labdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a lab manual.
    Render(RenderArgs),
    /// Render all lab manuals in a directory.
    Batch(BatchArgs),
    /// Create a lab manual from a starter template.
    New(NewArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Batch(args) => args.verbose,
        Commands::New(_) => false,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Batch(args) => args.execute(),
        Commands::New(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
