//! Rasterize CLI tool
//!
//! Writes one JPEG per page of a PDF next to the input.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use pdf_toolkit::cli::{exit_with_error, parse_args, require_input};
use pdf_toolkit::logging::init_tracing;
use pdf_toolkit::raster::{rasterize_pdf, RasterizeOptions, DEFAULT_JPEG_QUALITY};

/// Render each page of a PDF to a JPEG file
#[derive(Parser)]
#[command(name = "rasterize")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PDF to rasterize
    #[arg(allow_hyphen_values = true)]
    pdf: PathBuf,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

fn main() {
    init_tracing();
    let cli: Cli = parse_args();

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

fn run(cli: Cli) -> Result<()> {
    require_input(&cli.pdf)?;

    let options = RasterizeOptions {
        quality: cli.quality,
    };
    let report = rasterize_pdf(&cli.pdf, &options)
        .with_context(|| format!("Failed to rasterize {}", cli.pdf.display()))?;

    let program = std::env::args().next().unwrap_or_else(|| "rasterize".to_string());
    println!("{} created {} JPEG files from the PDF document", program, report.page_count);
    Ok(())
}
