//! PDF Toolkit Library
//!
//! Small PDF utilities built on a page-drawing context:
//! - Stamp a diagonal "Confidential" watermark across every page
//! - Overlay the first page of another PDF as a watermark
//! - Render each page of a PDF to a JPEG file
//! - Draw a fan of alpha-blended rectangles into a new PDF
//!
//! # Example
//!
//! ```no_run
//! use pdf_toolkit::pdf::SourceDocument;
//! use pdf_toolkit::stamp::{stamp_document, StampOptions};
//! use std::path::Path;
//!
//! let source = SourceDocument::open(Path::new("report.pdf"))?;
//! stamp_document(&source, Path::new("report-stamped.pdf"), &StampOptions::default())?;
//! # Ok::<(), pdf_toolkit::Error>(())
//! ```

pub mod error;
pub mod pdf;
pub mod layout;
pub mod host;
pub mod stamp;
pub mod watermark;
pub mod raster;
pub mod demo;
pub mod logging;
pub mod cli;

// Re-export commonly used items
pub use error::{Error, Result};
