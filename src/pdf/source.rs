//! Read-only access to an existing PDF: its pages and their media boxes

use std::path::{Path, PathBuf};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tiny_skia_path::Rect;
use tracing::debug;
use crate::error::{Error, Result};
use crate::layout::{normalize_origin, rect_from_corners};

/// Page tree nesting limit when walking `/Parent` links
const MAX_INHERITANCE_DEPTH: usize = 32;

/// A PDF document opened for reading
#[derive(Debug)]
pub struct SourceDocument {
    path: PathBuf,
    doc: Document,
    /// Page object ids in page order
    pages: Vec<ObjectId>,
}

impl SourceDocument {
    /// Open a PDF file
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let doc = Document::load(path)?;
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

        if pages.is_empty() {
            return Err(Error::EmptyPdf(path.to_path_buf()));
        }

        debug!(path = %path.display(), pages = pages.len(), "opened source document");

        Ok(Self {
            path: path.to_path_buf(),
            doc,
            pages,
        })
    }

    /// Path the document was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The underlying lopdf document
    pub(crate) fn document(&self) -> &Document {
        &self.doc
    }

    /// Object id of a 1-based page number
    pub(crate) fn page_id(&self, page: usize) -> Result<ObjectId> {
        if page == 0 || page > self.pages.len() {
            return Err(Error::InvalidPage {
                page,
                total: self.pages.len(),
            });
        }
        Ok(self.pages[page - 1])
    }

    /// Media box of a 1-based page, as stored in the file
    pub fn media_box(&self, page: usize) -> Result<Rect> {
        let page_id = self.page_id(page)?;
        let media_box = inherited_attribute(&self.doc, page_id, b"MediaBox")
            .ok_or(Error::InvalidMediaBox { page })?;
        rect_from_object(&self.doc, &media_box).ok_or(Error::InvalidMediaBox { page })
    }

    /// Media box of a 1-based page moved to the origin
    pub fn normalized_media_box(&self, page: usize) -> Result<Rect> {
        Ok(normalize_origin(self.media_box(page)?))
    }
}

/// Follow a reference to the object it points at
pub(crate) fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

/// Look up a page attribute, walking up the page tree for inheritable keys
pub(crate) fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node_id = page_id;

    for _ in 0..MAX_INHERITANCE_DEPTH {
        let node: &Dictionary = match doc.get_object(node_id) {
            Ok(Object::Dictionary(dict)) => dict,
            _ => return None,
        };

        if let Ok(value) = node.get(key) {
            return Some(resolve(doc, value).clone());
        }

        node_id = match node.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => *parent_id,
            _ => return None,
        };
    }

    None
}

/// Read a number that may be stored as an integer or a real
pub(crate) fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(n) => Some(*n as f32),
        Object::Real(n) => Some(*n),
        _ => None,
    }
}

/// Convert a PDF rectangle array into a box
fn rect_from_object(doc: &Document, object: &Object) -> Option<Rect> {
    let values: Vec<f32> = match object {
        Object::Array(items) => items
            .iter()
            .filter_map(|item| number(resolve(doc, item)))
            .collect(),
        _ => return None,
    };

    if values.len() != 4 {
        return None;
    }

    rect_from_corners(values[0], values[1], values[2], values[3])
}
