use crate::RenderError;
use factura_layout::Page;
use factura_types::PageGeometry;
use std::io::{Seek, Write};

/// A trait for page renderers, abstracting the output-writing primitives.
///
/// Usage is strictly sequential: `begin_document`, one `render_page`
/// call per logical page in order, then `finish`, which hands the
/// writer back only when the whole document was written successfully.
pub trait PageRenderer<W: Write + Seek> {
    fn begin_document(&mut self, writer: W, geometry: PageGeometry) -> Result<(), RenderError>;

    fn render_page(&mut self, page: &Page) -> Result<(), RenderError>;

    fn finish(self: Box<Self>) -> Result<W, RenderError>;
}
