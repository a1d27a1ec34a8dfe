//! PDF reading and drawing

pub mod source;
pub mod context;
pub mod font;
pub mod gstate;

// Re-export commonly used items
pub use source::SourceDocument;
pub use context::{with_pdf_context, DocumentInfo, PdfContext};
pub use font::StandardFont;
pub use gstate::{GraphicsState, Rgb, TextDrawingMode};
