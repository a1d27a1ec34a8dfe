//! Stamp CLI tool
//!
//! Stamps "Confidential" diagonally across every page of a PDF, deletes the
//! input and opens the stamped copy. Invoked by printing workflows as
//! `stamp <title> <options> <pdf-path>`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use pdf_toolkit::cli::{exit_with_error, parse_args, require_input};
use pdf_toolkit::host::{DefaultViewer, SystemTempFiles};
use pdf_toolkit::logging::init_tracing;
use pdf_toolkit::stamp::{run_stamper, StampOptions, StampRequest};

/// Stamp a PDF with a diagonal "Confidential" watermark
#[derive(Parser)]
#[command(name = "stamp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Job title, used to name the output file
    #[arg(allow_hyphen_values = true)]
    title: String,

    /// Workflow options (accepted and ignored)
    #[arg(allow_hyphen_values = true)]
    options: String,

    /// PDF to stamp; deleted once the stamped copy is written
    #[arg(allow_hyphen_values = true)]
    pdf: PathBuf,
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

    let request = StampRequest {
        title: cli.title,
        options: cli.options,
        input: cli.pdf,
    };

    let output = run_stamper(&request, &StampOptions::default(), &SystemTempFiles::default(), &DefaultViewer)
        .with_context(|| format!("Failed to stamp {}", request.input.display()))?;

    eprintln!("Stamped: {}", output.display());
    Ok(())
}
