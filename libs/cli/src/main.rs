//! keychain: command-line interface for image-to-keychain STL generation.
//!
//! Runs the same pipeline as the browser build: the image is binarized,
//! traced, extruded onto a base plate and optionally pierced by a key ring
//! hole.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=keychain_gen=info` - One line per generated model
//! - `RUST_LOG=image_trace=debug,solid_mesh=debug` - Stage details
//! - `RUST_LOG=debug` - All debug output
//!
//! # Example
//!
//! ```bash
//! # Plate with a hole near the top edge
//! keychain generate logo.png -o logo.stl --hole --hole-y 85
//!
//! # Binary STL and a JSON report for scripting
//! keychain generate logo.png -o logo.stl --binary --format json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod output;

use commands::{generate, inspect};

/// keychain - Turn an image into a printable keychain.
#[derive(Parser)]
#[command(name = "keychain")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an STL solid from a PNG or JPEG image
    Generate(generate::GenerateArgs),

    /// Summarize an existing STL file
    Inspect {
        /// Input STL file
        input: PathBuf,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "keychain_gen=info,image_trace=info,solid_mesh=info",
            2 => "keychain_gen=debug,image_trace=debug,solid_mesh=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Generate(args) => generate::run(args, &cli),
        Commands::Inspect { input } => inspect::run(input, &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            eprintln!("{}: {}", "Error".red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {}", "Caused by".yellow(), cause);
            }
            if let Some(gen_err) = e.downcast_ref::<keychain_gen::GenerateError>() {
                if gen_err.is_input_error() {
                    eprintln!(
                        "  {}: check the image file and the generation options",
                        "Suggestion".green()
                    );
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
