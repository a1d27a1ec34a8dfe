//! Watermark CLI tool
//!
//! Draws the first page of a stamp PDF diagonally over every page of the input
//! and writes `<input>.watermarked.pdf`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use pdf_toolkit::cli::{exit_with_error, parse_args, require_input};
use pdf_toolkit::logging::init_tracing;
use pdf_toolkit::watermark::{run_watermark, WatermarkOptions, DEFAULT_STAMP_FILE};

/// Overlay a stamp PDF diagonally on every page of a PDF
#[derive(Parser)]
#[command(name = "watermark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PDF to watermark
    #[arg(allow_hyphen_values = true)]
    inputfile: PathBuf,

    /// PDF whose first page is used as the watermark
    #[arg(long, default_value = DEFAULT_STAMP_FILE)]
    stamp: PathBuf,
}

fn main() {
    init_tracing();
    let cli: Cli = parse_args();

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

fn run(cli: Cli) -> Result<()> {
    require_input(&cli.inputfile)?;
    require_input(&cli.stamp)?;

    let options = WatermarkOptions {
        stamp_path: cli.stamp,
        ..WatermarkOptions::default()
    };
    let output = run_watermark(&cli.inputfile, &options)
        .with_context(|| format!("Failed to watermark {}", cli.inputfile.display()))?;

    eprintln!("Watermarked: {}", output.display());
    Ok(())
}
