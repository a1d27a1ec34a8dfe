//! Alpha rectangles demo
//!
//! Writes `alpharects.pdf` in the current directory: six red rectangles of
//! decreasing opacity fanned around a point.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use pdf_toolkit::cli::{exit_with_error, parse_args};
use pdf_toolkit::demo::{create_alpha_rects, ALPHA_RECTS_FILE};
use pdf_toolkit::logging::init_tracing;

/// Draw alpha-blended rectangles into alpharects.pdf
#[derive(Parser)]
#[command(name = "alpharects")]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() {
    init_tracing();
    let _cli: Cli = parse_args();

    if let Err(e) = run() {
        exit_with_error(e);
    }
}

fn run() -> Result<()> {
    let path = Path::new(ALPHA_RECTS_FILE);
    create_alpha_rects(path).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
