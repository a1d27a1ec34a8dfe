//! Render PDF pages to JPEG files using mupdf

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use lopdf::Object;
use mupdf::{Colorspace, Matrix};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::layout::pixel_size;
use crate::pdf::context::rect_array;
use crate::pdf::source::SourceDocument;

/// Default JPEG quality
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Options for rasterizing
#[derive(Debug, Clone)]
pub struct RasterizeOptions {
    /// JPEG quality, 1-100
    pub quality: u8,
}

impl Default for RasterizeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// What a rasterizer run produced
#[derive(Debug, Clone)]
pub struct RasterizeReport {
    pub page_count: usize,
    /// Written JPEG files in page order
    pub outputs: Vec<PathBuf>,
}

/// Output path for one page: `<base>.jpg` for a single page, `<base>.<page>.jpg` otherwise
pub fn jpeg_output_path(input: &Path, page: usize, page_count: usize) -> PathBuf {
    let mut name = input.with_extension("").into_os_string();
    if page_count == 1 {
        name.push(".jpg");
    } else {
        name.push(format!(".{}.jpg", page));
    }
    PathBuf::from(name)
}

/// An RGB raster a page is drawn into before encoding
pub struct BitmapCanvas {
    image: RgbImage,
}

impl BitmapCanvas {
    /// A canvas of `width` × `height` pixels filled with `color`
    pub fn with_color(width: u32, height: u32, color: [u8; 3]) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(color)),
        }
    }

    /// A canvas filled with opaque white
    pub fn white(width: u32, height: u32) -> Self {
        Self::with_color(width, height, [255, 255, 255])
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Composite premultiplied RGBA samples over the canvas, anchored at the top-left
    ///
    /// Samples outside the canvas are ignored.
    pub fn composite_premultiplied(&mut self, samples: &[u8], width: u32, height: u32, components: usize) {
        let columns = width.min(self.width());
        let rows = height.min(self.height());

        for y in 0..rows {
            for x in 0..columns {
                let offset = (y as usize * width as usize + x as usize) * components;
                let Some(pixel) = samples.get(offset..offset + components) else {
                    continue;
                };

                let out = self.image.get_pixel_mut(x, y);
                match components {
                    4 => {
                        let coverage = 255 - pixel[3];
                        for c in 0..3 {
                            out[c] = pixel[c].saturating_add(((out[c] as u16 * coverage as u16) / 255) as u8);
                        }
                    }
                    3 => out.0 = [pixel[0], pixel[1], pixel[2]],
                    1 => out.0 = [pixel[0]; 3],
                    _ => {}
                }
            }
        }
    }

    /// Encode the canvas as JPEG into `path`, consuming the canvas
    pub fn write_jpeg(self, path: &Path, quality: u8) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        let encoder = JpegEncoder::new_with_quality(writer, quality);
        self.image.write_with_encoder(encoder)?;
        Ok(())
    }
}

/// Write one JPEG per page of `input`
pub fn rasterize_pdf(input: &Path, options: &RasterizeOptions) -> Result<RasterizeReport> {
    let source = SourceDocument::open(input)?;
    let page_count = source.page_count();

    let rendering_copy = media_box_rendering_copy(&source)?;
    let path = rendering_copy.path();
    let path = path
        .to_str()
        .ok_or_else(|| Error::General(format!("Path is not valid UTF-8: {}", path.display())))?;
    let document = mupdf::Document::open(path).map_err(|e| Error::Render {
        page: 0,
        reason: format!("Failed to open document: {e}"),
    })?;

    let mut outputs = Vec::with_capacity(page_count);

    for page in 1..=page_count {
        let media_box = source.normalized_media_box(page)?;
        let (width, height) = pixel_size(media_box);

        let mut canvas = BitmapCanvas::white(width, height);
        render_page_into(&document, page, &mut canvas)?;

        let output = jpeg_output_path(input, page, page_count);
        canvas.write_jpeg(&output, options.quality)?;

        debug!(page, width, height, output = %output.display(), "wrote JPEG");
        outputs.push(output);
    }

    info!(input = %input.display(), pages = page_count, "rasterized document");

    Ok(RasterizeReport {
        page_count,
        outputs,
    })
}

/// Copy of the source whose pages show exactly their media box, unrotated
///
/// mupdf renders the crop box after applying `/Rotate`. Pinning both to the
/// media box makes the pixmap line up with the media-box canvas.
fn media_box_rendering_copy(source: &SourceDocument) -> Result<NamedTempFile> {
    let mut doc = source.document().clone();

    for page in 1..=source.page_count() {
        let media_box = source.media_box(page)?;
        let page_dict = doc.get_object_mut(source.page_id(page)?)?.as_dict_mut()?;
        page_dict.set("MediaBox", rect_array(media_box));
        page_dict.set("CropBox", rect_array(media_box));
        page_dict.set("Rotate", Object::Integer(0));
    }

    let mut file = tempfile::Builder::new()
        .prefix("rasterize.")
        .suffix(".pdf")
        .tempfile()?;
    doc.save_to(&mut file)?;
    file.flush()?;

    Ok(file)
}

/// Render a 1-based page at one pixel per point onto the canvas
fn render_page_into(document: &mupdf::Document, page: usize, canvas: &mut BitmapCanvas) -> Result<()> {
    let render_error = |reason: String| Error::Render { page, reason };

    let loaded = document
        .load_page(page as i32 - 1)
        .map_err(|e| render_error(format!("Failed to load page: {e}")))?;

    let matrix = Matrix::new_scale(1.0, 1.0);
    let pixmap = loaded
        .to_pixmap(&matrix, &Colorspace::device_rgb(), true, false)
        .map_err(|e| render_error(format!("Failed to render: {e}")))?;

    canvas.composite_premultiplied(
        pixmap.samples(),
        pixmap.width() as u32,
        pixmap.height() as u32,
        pixmap.n() as usize,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_name() {
        let path = jpeg_output_path(Path::new("docs/report.pdf"), 1, 1);
        assert_eq!(path, PathBuf::from("docs/report.jpg"));
    }

    #[test]
    fn test_numbered_page_names() {
        let input = Path::new("docs/report.pdf");
        assert_eq!(jpeg_output_path(input, 1, 3), PathBuf::from("docs/report.1.jpg"));
        assert_eq!(jpeg_output_path(input, 3, 3), PathBuf::from("docs/report.3.jpg"));
    }

    #[test]
    fn test_name_without_extension() {
        assert_eq!(jpeg_output_path(Path::new("scan"), 1, 1), PathBuf::from("scan.jpg"));
        assert_eq!(jpeg_output_path(Path::new("scan"), 2, 2), PathBuf::from("scan.2.jpg"));
    }

    #[test]
    fn test_only_last_extension_is_replaced() {
        let path = jpeg_output_path(Path::new("q3.report.pdf"), 1, 1);
        assert_eq!(path, PathBuf::from("q3.report.jpg"));
    }

    fn rotated_cropped_page(path: &Path) {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut page = lopdf::Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Rotate", Object::Integer(90));
        page.set("CropBox", Object::Array(vec![Object::Integer(0), Object::Integer(0), Object::Integer(100), Object::Integer(100)]));
        let page_id = doc.add_object(Object::Dictionary(page));

        let mut pages = lopdf::Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
        pages.set("Count", Object::Integer(1));
        pages.set("MediaBox", Object::Array(vec![Object::Integer(0), Object::Integer(0), Object::Integer(612), Object::Integer(792)]));
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = lopdf::Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(Object::Dictionary(catalog));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        doc.save(path).unwrap();
    }

    #[test]
    fn test_rendering_copy_shows_media_box_unrotated() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let input = temp_dir.path().join("rotated.pdf");
        rotated_cropped_page(&input);

        let source = SourceDocument::open(&input).unwrap();
        let copy = media_box_rendering_copy(&source).unwrap();
        let rendered = SourceDocument::open(copy.path()).unwrap();

        let page = rendered.document().get_object(rendered.page_id(1).unwrap()).unwrap().as_dict().unwrap();
        assert_eq!(page.get(b"Rotate").unwrap().as_i64().unwrap(), 0);

        let crop_box = page.get(b"CropBox").unwrap().as_array().unwrap();
        let values: Vec<f32> = crop_box.iter().map(|v| crate::pdf::source::number(v).unwrap()).collect();
        assert_eq!(values, vec![0.0, 0.0, 612.0, 792.0]);
        assert_eq!(rendered.media_box(1).unwrap().width(), 612.0);
    }

    #[test]
    fn test_canvas_starts_white() {
        let canvas = BitmapCanvas::white(4, 3);
        assert_eq!(canvas.width(), 4);
        assert_eq!(canvas.height(), 3);
        assert!(canvas.image.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_composite_transparent_keeps_background() {
        let mut canvas = BitmapCanvas::white(2, 1);
        // opaque red, then fully transparent
        let samples = [255, 0, 0, 255, 0, 0, 0, 0];
        canvas.composite_premultiplied(&samples, 2, 1, 4);

        assert_eq!(canvas.image.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(canvas.image.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_composite_half_transparent_black() {
        let mut canvas = BitmapCanvas::white(1, 1);
        // black at alpha 128, premultiplied colour stays 0
        canvas.composite_premultiplied(&[0, 0, 0, 128], 1, 1, 4);
        assert_eq!(canvas.image.get_pixel(0, 0).0, [127, 127, 127]);
    }

    #[test]
    fn test_composite_clips_to_canvas() {
        let mut canvas = BitmapCanvas::white(1, 1);
        let samples = [0u8; 2 * 2 * 4];
        canvas.composite_premultiplied(&samples, 2, 2, 4);
        assert_eq!(canvas.width(), 1);
        assert_eq!(canvas.image.get_pixel(0, 0).0, [255, 255, 255]);
    }
}
