//! PDF drawing context: page-scoped vector drawing into a new PDF file
//!
//! Pages are built as lopdf content streams. Pages of existing documents are
//! embedded as Form XObjects so a whole source page draws as one `Do`.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tiny_skia_path::{Point, Rect, Transform};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::pdf::font::{encode_win_ansi, StandardFont};
use crate::pdf::gstate::{
    matrix_operands, rotation, scale, translation, GraphicsState, GraphicsStateStack, Rgb,
    TextDrawingMode,
};
use crate::pdf::source::{inherited_attribute, resolve, SourceDocument};

/// Producer string written into every document's Info dictionary
const PRODUCER: &str = concat!("pdf-toolkit ", env!("CARGO_PKG_VERSION"));

/// Document-level metadata written on finish
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    /// Application that created the document
    pub creator: Option<String>,
}

/// Resources referenced by one page's content stream
#[derive(Debug, Default)]
struct PageResources {
    fonts: BTreeMap<String, ObjectId>,
    ext_g_states: BTreeMap<String, ObjectId>,
    xobjects: BTreeMap<String, ObjectId>,
}

impl PageResources {
    fn to_dictionary(&self) -> Dictionary {
        let mut resources = Dictionary::new();
        for (key, entries) in [
            ("Font", &self.fonts),
            ("ExtGState", &self.ext_g_states),
            ("XObject", &self.xobjects),
        ] {
            if entries.is_empty() {
                continue;
            }
            let mut dict = Dictionary::new();
            for (name, id) in entries {
                dict.set(name.as_bytes().to_vec(), Object::Reference(*id));
            }
            resources.set(key, Object::Dictionary(dict));
        }
        resources
    }
}

/// The page currently being drawn
#[derive(Debug)]
struct OpenPage {
    media_box: Rect,
    operations: Vec<Operation>,
    resources: PageResources,
}

/// Pages of one source document copied into the output
#[derive(Debug, Default)]
struct ImportedSource {
    /// Page object ids after renumbering, in page order
    page_ids: Vec<ObjectId>,
    /// Form XObject per 1-based page number, created on first use
    forms: HashMap<usize, ObjectId>,
}

/// A PDF file being written one page at a time
///
/// Drawing calls are only valid between [`PdfContext::begin_page`] and
/// [`PdfContext::end_page`]. [`PdfContext::finish`] writes the file; a context
/// dropped without finishing is finished on drop.
pub struct PdfContext {
    path: PathBuf,
    doc: Document,
    pages_id: ObjectId,
    default_media_box: Rect,
    page_ids: Vec<ObjectId>,
    page: Option<OpenPage>,
    state: GraphicsStateStack,
    text_position: Point,
    fonts: HashMap<StandardFont, (String, ObjectId)>,
    alpha_states: HashMap<u32, (String, ObjectId)>,
    imported: HashMap<PathBuf, ImportedSource>,
    info: DocumentInfo,
    finished: bool,
}

impl PdfContext {
    /// Create a context writing to `path`, with `media_box` as the default page size
    pub fn create(path: &Path, media_box: Rect) -> Result<Self> {
        // Surface permission and missing-directory errors before any drawing
        File::create(path)?;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        debug!(path = %path.display(), "created PDF context");

        Ok(Self {
            path: path.to_path_buf(),
            doc,
            pages_id,
            default_media_box: media_box,
            page_ids: Vec::new(),
            page: None,
            state: GraphicsStateStack::new(),
            text_position: Point::from_xy(0.0, 0.0),
            fonts: HashMap::new(),
            alpha_states: HashMap::new(),
            imported: HashMap::new(),
            info: DocumentInfo::default(),
            finished: false,
        })
    }

    /// Set the metadata written on finish
    pub fn with_info(mut self, info: DocumentInfo) -> Self {
        self.info = info;
        self
    }

    /// Current graphics state
    pub fn graphics_state(&self) -> &GraphicsState {
        self.state.current()
    }

    /// Pen position after the last text drawn
    pub fn text_position(&self) -> Point {
        self.text_position
    }

    /// Start a page with the context's default media box
    pub fn begin_default_page(&mut self) -> Result<()> {
        self.begin_page(self.default_media_box)
    }

    /// Start a new page with the given media box
    pub fn begin_page(&mut self, media_box: Rect) -> Result<()> {
        if self.page.is_some() {
            return Err(Error::PageAlreadyOpen);
        }

        self.state.reset();
        self.text_position = Point::from_xy(0.0, 0.0);
        self.page = Some(OpenPage {
            media_box,
            operations: Vec::new(),
            resources: PageResources::default(),
        });

        Ok(())
    }

    /// Finish the current page and add it to the document
    pub fn end_page(&mut self) -> Result<()> {
        let page = self.page.take().ok_or(Error::NoActivePage)?;

        if self.state.depth() > 0 {
            warn!(depth = self.state.depth(), "page ended with unbalanced graphics state saves");
        }

        let content = Content {
            operations: page.operations,
        };
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set("MediaBox", rect_array(page.media_box));
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(page.resources.to_dictionary()));

        let page_id = self.doc.add_object(Object::Dictionary(page_dict));
        self.page_ids.push(page_id);

        debug!(page = self.page_ids.len(), "ended page");
        Ok(())
    }

    /// Save the graphics state (`q`)
    pub fn save_state(&mut self) -> Result<()> {
        self.push_op("q", vec![])?;
        self.state.save();
        Ok(())
    }

    /// Restore the most recently saved graphics state (`Q`)
    pub fn restore_state(&mut self) -> Result<()> {
        self.open_page()?;
        self.state.restore()?;
        self.push_op("Q", vec![])
    }

    /// Concatenate a transform onto the current transformation matrix
    pub fn concat_transform(&mut self, transform: Transform) -> Result<()> {
        let operands = matrix_operands(&transform)
            .iter()
            .map(|value| Object::Real(*value))
            .collect();
        self.push_op("cm", operands)?;
        self.state.concat(transform);
        Ok(())
    }

    /// Move the origin by (tx, ty)
    pub fn translate(&mut self, tx: f32, ty: f32) -> Result<()> {
        self.concat_transform(translation(tx, ty))
    }

    /// Rotate the drawing surface counter-clockwise by `angle` radians
    pub fn rotate(&mut self, angle: f32) -> Result<()> {
        self.concat_transform(rotation(angle))
    }

    /// Set the fill colour and its alpha
    pub fn set_rgb_fill_color(&mut self, r: f32, g: f32, b: f32, alpha: f32) -> Result<()> {
        self.push_op("rg", vec![Object::Real(r), Object::Real(g), Object::Real(b)])?;

        let state = self.state.current_mut();
        state.fill_color = Rgb { r, g, b };
        state.fill_alpha = alpha.clamp(0.0, 1.0);

        self.apply_alpha()
    }

    /// Set the global alpha applied to everything painted afterwards
    pub fn set_alpha(&mut self, alpha: f32) -> Result<()> {
        self.open_page()?;
        self.state.current_mut().global_alpha = alpha.clamp(0.0, 1.0);
        self.apply_alpha()
    }

    /// Set how text is painted
    pub fn set_text_drawing_mode(&mut self, mode: TextDrawingMode) -> Result<()> {
        self.open_page()?;
        self.state.current_mut().text_mode = mode;
        Ok(())
    }

    /// Fill a rectangle with the current fill colour
    pub fn fill_rect(&mut self, rect: Rect) -> Result<()> {
        self.push_op("re", rect_operands(rect))?;
        self.push_op("f", vec![])
    }

    /// Intersect the clipping path with a rectangle
    pub fn clip_to_rect(&mut self, rect: Rect) -> Result<()> {
        self.push_op("re", rect_operands(rect))?;
        self.push_op("W", vec![])?;
        self.push_op("n", vec![])
    }

    /// Lay out a single line of text at the top of `rect`
    ///
    /// The pen starts at the left edge of `rect` and ends after the last
    /// glyph, see [`PdfContext::text_position`]. Returns the laid-out line box,
    /// which spans the full width of `rect`, not the width of the text.
    pub fn draw_text_in_rect(
        &mut self,
        text: &str,
        rect: Rect,
        font: StandardFont,
        font_size: f32,
    ) -> Result<Rect> {
        self.open_page()?;
        let font_name = self.font_resource(font)?;

        let line_height = font.line_height(font_size);
        let top = rect.y() + rect.height();
        let baseline = top - font.ascent() * font_size / 1000.0;
        let x = rect.x();
        let mode = self.state.current().text_mode;

        self.push_op("BT", vec![])?;
        self.push_op("Tf", vec![Object::Name(font_name.into_bytes()), Object::Real(font_size)])?;
        self.push_op("Tr", vec![Object::Integer(mode.render_mode())])?;
        self.push_op("Tm", vec![
            Object::Real(1.0),
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(1.0),
            Object::Real(x),
            Object::Real(baseline),
        ])?;
        self.push_op("Tj", vec![Object::String(encode_win_ansi(text), StringFormat::Literal)])?;
        self.push_op("ET", vec![])?;

        self.text_position = Point::from_xy(x + font.text_width(text, font_size), baseline);

        Rect::from_xywh(rect.x(), top - line_height, rect.width(), line_height)
            .ok_or_else(|| Error::General(format!("Cannot lay out text in {:?}", rect)))
    }

    /// Draw a whole page of another PDF, mapping its media box onto `rect`
    pub fn draw_pdf_page(&mut self, rect: Rect, source: &SourceDocument, page: usize) -> Result<()> {
        self.open_page()?;

        let source_box = source.media_box(page)?;
        let form_id = self.import_page(source, page)?;
        let name = format!("Fm{}", form_id.0);

        if let Some(open) = self.page.as_mut() {
            open.resources.xobjects.insert(name.clone(), form_id);
        }

        let placement = translation(rect.x(), rect.y())
            .pre_concat(scale(
                rect.width() / source_box.width(),
                rect.height() / source_box.height(),
            ))
            .pre_concat(translation(-source_box.x(), -source_box.y()));

        self.save_state()?;
        self.concat_transform(placement)?;
        self.push_op("Do", vec![Object::Name(name.into_bytes())])?;
        self.restore_state()
    }

    /// Write the document to disk, consuming the context
    pub fn finish(mut self) -> Result<()> {
        self.finalize()
    }

    fn finalize(&mut self) -> Result<()> {
        self.finished = true;

        if self.page.is_some() {
            warn!("finishing PDF context with an open page; ending it");
            self.end_page()?;
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|&id| Object::Reference(id)).collect();

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(self.page_ids.len() as i64));
        pages.set("Kids", Object::Array(kids));
        pages.set("MediaBox", rect_array(self.default_media_box));
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(Object::Dictionary(catalog));

        let info_id = self.doc.add_object(Object::Dictionary(self.info_dictionary()));

        self.doc.trailer.set("Root", Object::Reference(catalog_id));
        self.doc.trailer.set("Info", Object::Reference(info_id));

        // Imported page trees are no longer reachable once their pages live in forms
        let pruned = self.doc.prune_objects();
        if !pruned.is_empty() {
            debug!(count = pruned.len(), "pruned unreferenced objects");
        }

        self.doc.compress();
        self.doc.save(&self.path)?;

        info!(path = %self.path.display(), pages = self.page_ids.len(), "wrote PDF");
        Ok(())
    }

    fn info_dictionary(&self) -> Dictionary {
        let mut info = Dictionary::new();
        if let Some(ref creator) = self.info.creator {
            info.set("Creator", Object::String(creator.as_bytes().to_vec(), StringFormat::Literal));
        }
        info.set("Producer", Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal));

        let now = Local::now().format("D:%Y%m%d%H%M%S").to_string();
        info.set("CreationDate", Object::String(now.into_bytes(), StringFormat::Literal));
        info
    }

    fn open_page(&mut self) -> Result<&mut OpenPage> {
        self.page.as_mut().ok_or(Error::NoActivePage)
    }

    fn push_op(&mut self, operator: &str, operands: Vec<Object>) -> Result<()> {
        self.open_page()?.operations.push(Operation::new(operator, operands));
        Ok(())
    }

    /// Emit the ExtGState matching the current effective fill alpha
    fn apply_alpha(&mut self) -> Result<()> {
        let alpha = self.state.current().effective_fill_alpha();
        let key = alpha.to_bits();

        let (name, id) = match self.alpha_states.get(&key) {
            Some(entry) => entry.clone(),
            None => {
                let mut gs = Dictionary::new();
                gs.set("Type", Object::Name(b"ExtGState".to_vec()));
                gs.set("ca", Object::Real(alpha));
                gs.set("CA", Object::Real(alpha));
                let id = self.doc.add_object(Object::Dictionary(gs));
                let entry = (format!("GS{}", self.alpha_states.len()), id);
                self.alpha_states.insert(key, entry.clone());
                entry
            }
        };

        self.open_page()?.resources.ext_g_states.insert(name.clone(), id);
        self.push_op("gs", vec![Object::Name(name.into_bytes())])
    }

    /// Resource name for a font on the current page, adding the font on first use
    fn font_resource(&mut self, font: StandardFont) -> Result<String> {
        let (name, id) = match self.fonts.get(&font) {
            Some(entry) => entry.clone(),
            None => {
                let id = self.doc.add_object(Object::Dictionary(font.to_dictionary()));
                let entry = (format!("F{}", self.fonts.len() + 1), id);
                self.fonts.insert(font, entry.clone());
                entry
            }
        };

        self.open_page()?.resources.fonts.insert(name.clone(), id);
        Ok(name)
    }

    /// Form XObject holding a source page, copying the source's objects on first use
    fn import_page(&mut self, source: &SourceDocument, page: usize) -> Result<ObjectId> {
        // Validates the page number before touching the output document
        source.page_id(page)?;

        if !self.imported.contains_key(source.path()) {
            let imported = self.import_source(source);
            self.imported.insert(source.path().to_path_buf(), imported);
        }

        if let Some(form_id) = self
            .imported
            .get(source.path())
            .and_then(|imported| imported.forms.get(&page))
        {
            return Ok(*form_id);
        }

        let page_id = self.imported[source.path()].page_ids[page - 1];
        let media_box = source.media_box(page)?;
        let form_id = self.create_page_form(page_id, media_box)?;

        if let Some(imported) = self.imported.get_mut(source.path()) {
            imported.forms.insert(page, form_id);
        }

        debug!(source = %source.path().display(), page, "embedded source page");
        Ok(form_id)
    }

    /// Copy every object of a source document into the output with fresh ids
    fn import_source(&mut self, source: &SourceDocument) -> ImportedSource {
        let mut copy = source.document().clone();
        copy.decompress();
        copy.renumber_objects_with(self.doc.max_id + 1);

        let page_ids = copy.get_pages().into_values().collect();

        self.doc.max_id = copy.max_id;
        self.doc.objects.extend(copy.objects);

        ImportedSource {
            page_ids,
            forms: HashMap::new(),
        }
    }

    /// Wrap an imported page's content and resources in a Form XObject
    fn create_page_form(&mut self, page_id: ObjectId, media_box: Rect) -> Result<ObjectId> {
        let content = self.page_content(page_id)?;
        let resources = inherited_attribute(&self.doc, page_id, b"Resources")
            .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));

        let mut form = Dictionary::new();
        form.set("Type", Object::Name(b"XObject".to_vec()));
        form.set("Subtype", Object::Name(b"Form".to_vec()));
        form.set("FormType", Object::Integer(1));
        form.set("BBox", rect_array(media_box));
        form.set("Matrix", Object::Array(vec![
            Object::Integer(1),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(1),
            Object::Integer(0),
            Object::Integer(0),
        ]));
        form.set("Resources", resources);

        let form_stream = Stream {
            dict: form,
            content,
            allows_compression: true,
            start_position: None,
        };

        Ok(self.doc.add_object(Object::Stream(form_stream)))
    }

    /// Concatenated content streams of an imported page
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = match self.doc.get_object(page_id)? {
            Object::Dictionary(dict) => dict,
            _ => return Err(Error::General(format!("Page {:?} is not a dictionary", page_id))),
        };

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => resolve(&self.doc, contents),
            Err(_) => return Ok(Vec::new()),
        };

        let streams: Vec<&Object> = match contents {
            Object::Array(items) => items.iter().map(|item| resolve(&self.doc, item)).collect(),
            other => vec![other],
        };

        let mut combined = Vec::new();
        for object in streams {
            if let Object::Stream(stream) = object {
                let data = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                combined.extend_from_slice(&data);
                combined.push(b'\n');
            }
        }

        Ok(combined)
    }
}

impl Drop for PdfContext {
    fn drop(&mut self) {
        if !self.finished {
            warn!(path = %self.path.display(), "PDF context dropped without finish; finishing now");
            if let Err(e) = self.finalize() {
                warn!(error = %e, "failed to finish PDF context on drop");
            }
        }
    }
}

/// Run `draw` against a fresh context and always finish the context afterwards
///
/// The drawing error, if any, takes precedence over a finishing error.
pub fn with_pdf_context<T, F>(path: &Path, media_box: Rect, info: DocumentInfo, draw: F) -> Result<T>
where
    F: FnOnce(&mut PdfContext) -> Result<T>,
{
    let mut context = PdfContext::create(path, media_box)?.with_info(info);
    let drawn = draw(&mut context);
    let finished = context.finish();

    let value = drawn?;
    finished?;
    Ok(value)
}

/// A box as a PDF rectangle array [llx lly urx ury]
pub(crate) fn rect_array(rect: Rect) -> Object {
    Object::Array(vec![
        Object::Real(rect.x()),
        Object::Real(rect.y()),
        Object::Real(rect.x() + rect.width()),
        Object::Real(rect.y() + rect.height()),
    ])
}

fn rect_operands(rect: Rect) -> Vec<Object> {
    vec![
        Object::Real(rect.x()),
        Object::Real(rect.y()),
        Object::Real(rect.width()),
        Object::Real(rect.height()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn letter() -> Rect {
        Rect::from_xywh(0.0, 0.0, 612.0, 792.0).unwrap()
    }

    fn operators(context: &PdfContext) -> Vec<String> {
        context
            .page
            .as_ref()
            .map(|page| page.operations.iter().map(|op| op.operator.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_drawing_without_page_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut context = PdfContext::create(&temp_dir.path().join("out.pdf"), letter()).unwrap();

        assert!(matches!(context.fill_rect(letter()), Err(Error::NoActivePage)));
        assert!(matches!(context.save_state(), Err(Error::NoActivePage)));
        assert!(matches!(context.end_page(), Err(Error::NoActivePage)));
        context.finish().unwrap();
    }

    #[test]
    fn test_nested_begin_page_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut context = PdfContext::create(&temp_dir.path().join("out.pdf"), letter()).unwrap();

        context.begin_default_page().unwrap();
        assert!(matches!(context.begin_page(letter()), Err(Error::PageAlreadyOpen)));
        context.end_page().unwrap();
        context.finish().unwrap();
    }

    #[test]
    fn test_save_restore_emits_q_pair() {
        let temp_dir = TempDir::new().unwrap();
        let mut context = PdfContext::create(&temp_dir.path().join("out.pdf"), letter()).unwrap();

        context.begin_default_page().unwrap();
        context.save_state().unwrap();
        context.translate(10.0, 10.0).unwrap();
        context.restore_state().unwrap();
        assert!(matches!(context.restore_state(), Err(Error::GraphicsStateUnderflow)));

        assert_eq!(operators(&context), vec!["q", "cm", "Q"]);
        assert_eq!(context.graphics_state().ctm, Transform::identity());
        context.finish().unwrap();
    }

    #[test]
    fn test_alpha_states_are_shared() {
        let temp_dir = TempDir::new().unwrap();
        let mut context = PdfContext::create(&temp_dir.path().join("out.pdf"), letter()).unwrap();

        context.begin_default_page().unwrap();
        context.set_alpha(0.3).unwrap();
        context.set_alpha(1.0).unwrap();
        context.set_alpha(0.3).unwrap();

        assert_eq!(context.alpha_states.len(), 2);
        let page = context.page.as_ref().unwrap();
        assert_eq!(page.resources.ext_g_states.len(), 2);
        context.finish().unwrap();
    }

    #[test]
    fn test_text_layout_and_pen_position() {
        let temp_dir = TempDir::new().unwrap();
        let mut context = PdfContext::create(&temp_dir.path().join("out.pdf"), letter()).unwrap();

        context.begin_default_page().unwrap();
        context.set_text_drawing_mode(TextDrawingMode::Invisible).unwrap();
        let line = context
            .draw_text_in_rect("Confidential", letter(), StandardFont::HelveticaBold, 60.0)
            .unwrap();

        // The line box is as wide as the layout rect, not the text
        assert_eq!(line.width(), 612.0);
        assert!((line.height() - 55.5).abs() < 0.001);
        assert!((context.text_position().x - 346.68).abs() < 0.01);

        let tr = context.page.as_ref().unwrap().operations.iter()
            .find(|op| op.operator == "Tr")
            .map(|op| op.operands.clone())
            .unwrap();
        assert_eq!(tr[0].as_i64().unwrap(), 3);
        context.finish().unwrap();
    }

    #[test]
    fn test_finish_writes_pages() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.pdf");
        let mut context = PdfContext::create(&path, letter()).unwrap().with_info(DocumentInfo {
            creator: Some("Tests".to_string()),
        });

        for _ in 0..3 {
            context.begin_default_page().unwrap();
            context.fill_rect(Rect::from_xywh(10.0, 10.0, 20.0, 20.0).unwrap()).unwrap();
            context.end_page().unwrap();
        }
        context.finish().unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_drop_finishes_open_page() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dropped.pdf");
        {
            let mut context = PdfContext::create(&path, letter()).unwrap();
            context.begin_default_page().unwrap();
            context.fill_rect(letter()).unwrap();
        }

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_scoped_context_finishes_on_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scoped.pdf");

        let result: Result<()> = with_pdf_context(&path, letter(), DocumentInfo::default(), |ctx| {
            ctx.begin_default_page()?;
            ctx.fill_rect(letter())?;
            ctx.end_page()?;
            Err(Error::General("drawing failed".to_string()))
        });

        assert!(matches!(result, Err(Error::General(_))));
        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.pdf");
        assert!(matches!(PdfContext::create(&path, letter()), Err(Error::Io(_))));
    }
}
