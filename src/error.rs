//! Error types for the PDF toolkit library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF toolkit library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Page rendering failed
    #[error("Failed to render page {page}: {reason}")]
    Render { page: usize, reason: String },

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Page number outside the document
    #[error("Invalid page number {page} (document has {total} pages)")]
    InvalidPage { page: usize, total: usize },

    /// Page has no usable media box
    #[error("Page {page} has no valid media box")]
    InvalidMediaBox { page: usize },

    /// Drawing call made while no page is open
    #[error("No page is open on the drawing context")]
    NoActivePage,

    /// begin_page called while a page is still open
    #[error("A page is already open on the drawing context")]
    PageAlreadyOpen,

    /// restore called without a matching save
    #[error("Graphics state restore without a matching save")]
    GraphicsStateUnderflow,

    /// Default application could not be launched
    #[error("Failed to open viewer: {0}")]
    Launch(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Process exit status for this error.
    ///
    /// A missing input file exits with 2; everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::FileNotFound(_) => 2,
            _ => 1,
        }
    }
}
