//! Overlay the first page of a stamp PDF diagonally across every page of a PDF

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::error::Result;
use crate::layout::{center, diagonal_angle};
use crate::pdf::context::{with_pdf_context, DocumentInfo};
use crate::pdf::source::SourceDocument;
use crate::stamp::STAMPER_CREATOR;

/// Stamp document used when none is given
pub const DEFAULT_STAMP_FILE: &str = "confidential.pdf";

/// Suffix appended to the input name for the output
pub const WATERMARKED_SUFFIX: &str = ".watermarked.pdf";

/// Options for the PDF watermark
#[derive(Debug, Clone)]
pub struct WatermarkOptions {
    /// PDF whose first page is drawn over each page
    pub stamp_path: PathBuf,
    /// Creator written into the output's Info dictionary
    pub creator: String,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            stamp_path: PathBuf::from(DEFAULT_STAMP_FILE),
            creator: STAMPER_CREATOR.to_string(),
        }
    }
}

/// Output path for a watermarked copy: the input name plus `.watermarked.pdf`
pub fn watermarked_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(WATERMARKED_SUFFIX);
    PathBuf::from(name)
}

/// Write `source` to `output` with page 1 of `stamp` centred on each page's diagonal
pub fn watermark_document(
    source: &SourceDocument,
    stamp: &SourceDocument,
    output: &Path,
    creator: &str,
) -> Result<usize> {
    let first_page = source.normalized_media_box(1)?;
    let stamp_box = stamp.normalized_media_box(1)?;
    let info = DocumentInfo {
        creator: Some(creator.to_string()),
    };

    with_pdf_context(output, first_page, info, |context| {
        for page in 1..=source.page_count() {
            let page_box = source.normalized_media_box(page)?;
            let (center_x, center_y) = center(page_box);

            context.begin_page(page_box)?;
            context.save_state()?;
            context.clip_to_rect(page_box)?;
            context.draw_pdf_page(page_box, source, page)?;
            context.translate(center_x, center_y)?;
            context.rotate(diagonal_angle(page_box))?;
            context.translate(-stamp_box.width() / 2.0, -stamp_box.height() / 2.0)?;
            context.draw_pdf_page(stamp_box, stamp, 1)?;
            context.restore_state()?;
            context.end_page()?;

            debug!(page, "watermarked page");
        }

        Ok(source.page_count())
    })
}

/// Watermark `input` into `<input>.watermarked.pdf`, returning the output path
///
/// A partial output is removed if writing fails.
pub fn run_watermark(input: &Path, options: &WatermarkOptions) -> Result<PathBuf> {
    let source = SourceDocument::open(input)?;
    let stamp = SourceDocument::open(&options.stamp_path)?;
    let output = watermarked_output_path(input);

    match watermark_document(&source, &stamp, &output, &options.creator) {
        Ok(pages) => {
            info!(input = %input.display(), output = %output.display(), pages, "watermarked document");
            Ok(output)
        }
        Err(e) => {
            if output.exists() {
                if let Err(cleanup) = fs::remove_file(&output) {
                    warn!(path = %output.display(), error = %cleanup, "failed to remove partial output");
                }
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_output_path_appends_suffix() {
        let path = watermarked_output_path(Path::new("docs/report.pdf"));
        assert_eq!(path, PathBuf::from("docs/report.pdf.watermarked.pdf"));
    }

    #[test]
    fn test_missing_input() {
        let result = run_watermark(Path::new("nonexistent.pdf"), &WatermarkOptions::default());
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
