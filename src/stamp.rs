//! Diagonal "Confidential" text stamp across every page of a PDF

use std::fs;
use std::path::{Path, PathBuf};
use tiny_skia_path::Rect;
use tracing::{debug, info, warn};
use crate::error::{Error, Result};
use crate::host::{ApplicationLauncher, TemporaryFileProvider};
use crate::layout::{center, diagonal_angle};
use crate::pdf::context::{with_pdf_context, DocumentInfo, PdfContext};
use crate::pdf::font::StandardFont;
use crate::pdf::gstate::TextDrawingMode;
use crate::pdf::source::SourceDocument;

/// Default watermark text
pub const STAMP_TEXT: &str = "Confidential";

/// Creator recorded in stamped documents
pub const STAMPER_CREATOR: &str = "PDF Stamper Application";

/// Options for the text stamp
#[derive(Debug, Clone)]
pub struct StampOptions {
    /// Text drawn across each page
    pub text: String,
    /// Font used for the text
    pub font: StandardFont,
    /// Font size in points
    pub font_size: f32,
    /// Global alpha while drawing the text
    pub opacity: f32,
    /// Creator written into the output's Info dictionary
    pub creator: String,
}

impl Default for StampOptions {
    fn default() -> Self {
        Self {
            text: STAMP_TEXT.to_string(),
            font: StandardFont::HelveticaBold,
            font_size: 60.0,
            opacity: 0.3,
            creator: STAMPER_CREATOR.to_string(),
        }
    }
}

/// One stamper invocation as received from a printing workflow
#[derive(Debug, Clone)]
pub struct StampRequest {
    /// Job title, used as the output name prefix
    pub title: String,
    /// Workflow options; accepted and passed through
    pub options: String,
    /// PDF to stamp; deleted after a successful run
    pub input: PathBuf,
}

/// Measured size of the stamp text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub width: f32,
    pub height: f32,
}

impl TextBox {
    /// Measure the stamp by drawing it invisibly into `layout_rect`
    ///
    /// Width is the pen position after drawing, since the laid-out rectangle
    /// spans its container; height comes from the laid-out rectangle.
    pub fn measure(context: &mut PdfContext, layout_rect: Rect, options: &StampOptions) -> Result<Self> {
        context.set_text_drawing_mode(TextDrawingMode::Invisible)?;
        let line = context.draw_text_in_rect(&options.text, layout_rect, options.font, options.font_size)?;
        let width = context.text_position().x;
        context.set_text_drawing_mode(TextDrawingMode::Fill)?;

        Ok(Self {
            width,
            height: line.height(),
        })
    }

    fn to_rect(self) -> Result<Rect> {
        Rect::from_xywh(0.0, 0.0, self.width, self.height)
            .ok_or_else(|| Error::General(format!("Invalid stamp box {}x{}", self.width, self.height)))
    }
}

/// Write a stamped copy of `source` to `output`
///
/// Every page keeps its own size. The text box is measured on page 1 and reused
/// for all pages; the rotation follows each page's own diagonal. Returns the
/// number of pages written.
pub fn stamp_document(source: &SourceDocument, output: &Path, options: &StampOptions) -> Result<usize> {
    let first_page = source.normalized_media_box(1)?;
    let info = DocumentInfo {
        creator: Some(options.creator.clone()),
    };

    with_pdf_context(output, first_page, info, |context| {
        let mut text_box: Option<TextBox> = None;

        for page in 1..=source.page_count() {
            let media_box = source.normalized_media_box(page)?;
            context.begin_page(media_box)?;

            let stamp = match text_box {
                Some(measured) => measured,
                None => {
                    let measured = TextBox::measure(context, media_box, options)?;
                    debug!(width = measured.width, height = measured.height, "measured stamp text");
                    text_box = Some(measured);
                    measured
                }
            };

            context.draw_pdf_page(media_box, source, page)?;
            draw_stamp(context, media_box, stamp, options)?;
            context.end_page()?;

            debug!(page, "stamped page");
        }

        Ok(source.page_count())
    })
}

fn draw_stamp(context: &mut PdfContext, media_box: Rect, stamp: TextBox, options: &StampOptions) -> Result<()> {
    let (center_x, center_y) = center(media_box);

    context.save_state()?;
    context.translate(center_x, center_y)?;
    context.rotate(diagonal_angle(media_box))?;
    context.translate(-stamp.width / 2.0, -stamp.height / 2.0)?;
    context.set_alpha(options.opacity)?;
    context.draw_text_in_rect(&options.text, stamp.to_rect()?, options.font, options.font_size)?;
    context.restore_state()
}

/// Stamp the request's input into a temporary file, delete the input and open the result
///
/// The input is only deleted once the output has been written in full. If
/// stamping fails the partial output is removed and the input is kept. A
/// viewer that fails to launch is logged and does not fail the run.
pub fn run_stamper(
    request: &StampRequest,
    options: &StampOptions,
    temp_files: &dyn TemporaryFileProvider,
    launcher: &dyn ApplicationLauncher,
) -> Result<PathBuf> {
    if !request.input.is_file() {
        return Err(Error::FileNotFound(request.input.clone()));
    }

    debug!(title = %request.title, options = %request.options, "stamp request");

    let source = SourceDocument::open(&request.input)?;
    let output = temp_files.create(&format!("{}.", request.title))?;

    let pages = match stamp_document(&source, &output, options) {
        Ok(pages) => pages,
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&output) {
                warn!(path = %output.display(), error = %cleanup, "failed to remove partial output");
            }
            return Err(e);
        }
    };
    drop(source);

    fs::remove_file(&request.input)?;
    info!(input = %request.input.display(), output = %output.display(), pages, "stamped document");

    if let Err(e) = launcher.open(&output) {
        warn!(path = %output.display(), error = %e, "failed to open stamped document");
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = StampOptions::default();
        assert_eq!(options.text, "Confidential");
        assert_eq!(options.font_size, 60.0);
        assert_eq!(options.opacity, 0.3);
        assert_eq!(options.creator, "PDF Stamper Application");
    }

    #[test]
    fn test_text_box_rect() {
        let text_box = TextBox { width: 346.68, height: 55.5 };
        let rect = text_box.to_rect().unwrap();
        assert_eq!(rect.x(), 0.0);
        assert_eq!(rect.width(), 346.68);
        assert_eq!(rect.height(), 55.5);
    }

    // Stamping real documents is covered in tests/integration.rs
}
