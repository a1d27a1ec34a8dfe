//! Fan of alpha-blended rectangles drawn into a new PDF

use std::f32::consts::PI;
use std::path::Path;
use tiny_skia_path::Rect;
use tracing::info;
use crate::error::{Error, Result};
use crate::layout::PageDimensions;
use crate::pdf::context::{with_pdf_context, DocumentInfo, PdfContext};

/// Default output file name
pub const ALPHA_RECTS_FILE: &str = "alpharects.pdf";

/// Number of rectangles in the fan
pub const NUM_RECTS: usize = 6;

/// Size of each rectangle
pub const RECT_WIDTH: f32 = 130.0;
pub const RECT_HEIGHT: f32 = 100.0;

/// Alpha of the i-th rectangle (0-based)
pub fn rect_alpha(index: usize) -> f32 {
    1.0 - index as f32 / NUM_RECTS as f32
}

/// Draw the fan onto the current page
///
/// Each rectangle is red with alpha `1 - i/6`; the surface rotates by a sixth
/// of a turn after each one, so the rotations accumulate.
pub fn draw_alpha_rects(context: &mut PdfContext) -> Result<()> {
    let rect = Rect::from_xywh(0.0, 0.0, RECT_WIDTH, RECT_HEIGHT)
        .ok_or_else(|| Error::General("Invalid rectangle size".to_string()))?;
    let rotate_angle = 2.0 * PI / NUM_RECTS as f32;

    context.translate(2.0 * RECT_WIDTH, 2.0 * RECT_HEIGHT)?;

    for i in 0..NUM_RECTS {
        let tint = rect_alpha(i);
        context.set_rgb_fill_color(tint, 0.0, 0.0, tint)?;
        context.fill_rect(rect)?;
        context.rotate(rotate_angle)?;
    }

    Ok(())
}

/// Write the one-page alpha rectangles document to `path`
pub fn create_alpha_rects(path: &Path) -> Result<()> {
    let media_box = PageDimensions::letter()
        .to_rect()
        .ok_or_else(|| Error::General("Invalid page size".to_string()))?;

    with_pdf_context(path, media_box, DocumentInfo::default(), |context| {
        context.begin_default_page()?;
        draw_alpha_rects(context)?;
        context.end_page()
    })?;

    info!(path = %path.display(), "wrote alpha rectangles");
    Ok(())
}
