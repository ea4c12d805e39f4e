//! PDF renderer backend using the `lopdf` object model.
//!
//! Pages of abstract draw instructions are translated into PDF content
//! streams and written through a streaming xref writer, so the document
//! is serialized incrementally instead of being held in memory as a
//! whole `lopdf::Document`.

mod content;
mod images;
mod renderer;
mod writer;

pub use renderer::LopdfRenderer;
pub use writer::StreamingPdfWriter;
