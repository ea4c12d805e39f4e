use crate::content::{self, PageBuilder};
use crate::images;
use crate::writer::StreamingPdfWriter;
use factura_layout::{DrawElement, Page};
use factura_render_core::{PageRenderer, RenderError};
use factura_types::PageGeometry;
use lopdf::{Dictionary, Object, Stream, dictionary};
use std::io::{Cursor, Seek, Write};

/// A PDF renderer backed by a streaming `lopdf` writer.
///
/// One physical PDF page is opened per logical page, instructions are
/// drawn in the order given, and `finish` seals the document. Any I/O
/// failure aborts; the partially written output must be discarded by
/// the caller.
pub struct LopdfRenderer<W: Write + Seek> {
    writer: Option<StreamingPdfWriter<W>>,
    geometry: PageGeometry,
    image_count: usize,
}

impl<W: Write + Seek> LopdfRenderer<W> {
    pub fn new() -> Self {
        Self { writer: None, geometry: PageGeometry::a4(), image_count: 0 }
    }

    fn writer_mut(&mut self) -> Result<&mut StreamingPdfWriter<W>, RenderError> {
        self.writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("document not started".into()))
    }

    fn font_dict() -> Dictionary {
        let mut fonts = Dictionary::new();
        for (internal, base) in [("F1", "Helvetica"), ("F2", "Helvetica-Bold")] {
            let font = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base,
                "Encoding" => "WinAnsiEncoding",
            };
            fonts.set(internal.as_bytes().to_vec(), Object::Dictionary(font));
        }
        fonts
    }
}

impl<W: Write + Seek> Default for LopdfRenderer<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl LopdfRenderer<Cursor<Vec<u8>>> {
    /// Renders a whole document into an in-memory buffer.
    pub fn render_to_buffer(
        pages: &[Page],
        geometry: PageGeometry,
    ) -> Result<Vec<u8>, RenderError> {
        let mut renderer: Box<Self> = Box::new(Self::new());
        renderer.begin_document(Cursor::new(Vec::new()), geometry)?;
        for page in pages {
            renderer.render_page(page)?;
        }
        Ok(renderer.finish()?.into_inner())
    }
}

impl<W: Write + Seek> PageRenderer<W> for LopdfRenderer<W> {
    fn begin_document(&mut self, writer: W, geometry: PageGeometry) -> Result<(), RenderError> {
        self.geometry = geometry;
        self.writer = Some(StreamingPdfWriter::new(writer, "1.7", Self::font_dict())?);
        Ok(())
    }

    fn render_page(&mut self, page: &Page) -> Result<(), RenderError> {
        let geometry = self.geometry;
        let mut builder = PageBuilder::new(geometry.page_height);

        for el in page {
            match &el.element {
                DrawElement::Image(image) => match images::embed(&image.data) {
                    Ok(embedded) => {
                        self.image_count += 1;
                        let name = format!("Im{}", self.image_count);
                        let writer = self.writer_mut()?;
                        let id = writer.write_stream(embedded.stream)?;
                        writer.register_xobject(&name, id);
                        builder.draw_image(
                            el,
                            &name,
                            embedded.pixel_width,
                            embedded.pixel_height,
                        );
                    }
                    // A corrupt logo is decorative content; skip it and
                    // keep the document.
                    Err(e) => log::warn!("skipping undrawable image: {e}"),
                },
                _ => content::draw_simple(&mut builder, el),
            }
        }

        let encoded = builder
            .finish()
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let writer = self.writer_mut()?;
        let content_id = writer.write_stream(Stream::new(dictionary! {}, encoded))?;

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => writer.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                geometry.page_width.into(),
                geometry.page_height.into(),
            ],
            "Contents" => content_id,
            "Resources" => writer.resources_id,
        };
        let page_id = writer.write_object(page_dict.into())?;
        writer.push_page_id(page_id);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<W, RenderError> {
        let renderer = *self;
        match renderer.writer {
            Some(writer) => Ok(writer.finish()?),
            None => Err(RenderError::Other(
                "document was never started with begin_document".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factura_layout::{PositionedElement, TextStyle};
    use factura_types::Rect;
    use std::sync::Arc;

    fn text_page(content: &str) -> Page {
        vec![PositionedElement::text(40.0, 40.0, 200.0, content, TextStyle::body())]
    }

    #[test]
    fn produces_a_well_formed_pdf_shell() {
        let pages = vec![text_page("Bonjour")];
        let bytes = LopdfRenderer::render_to_buffer(&pages, PageGeometry::a4()).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.ends_with(b"%%EOF"));
    }

    #[test]
    fn one_physical_page_per_logical_page() {
        let pages = vec![text_page("un"), text_page("deux"), text_page("trois")];
        let bytes = LopdfRenderer::render_to_buffer(&pages, PageGeometry::a4()).unwrap();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn corrupt_image_is_skipped_and_document_still_renders() {
        let page = vec![
            PositionedElement::image(Rect::new(40.0, 40.0, 60.0, 60.0), Arc::new(vec![0, 1, 2])),
            PositionedElement::text(40.0, 120.0, 200.0, "texte", TextStyle::body()),
        ];
        let bytes = LopdfRenderer::render_to_buffer(&[page], PageGeometry::a4()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn finish_without_begin_is_an_error() {
        let renderer: Box<LopdfRenderer<Cursor<Vec<u8>>>> = Box::new(LopdfRenderer::new());
        assert!(matches!(renderer.finish(), Err(RenderError::Other(_))));
    }

    #[test]
    fn render_before_begin_is_an_error() {
        let mut renderer: LopdfRenderer<Cursor<Vec<u8>>> = LopdfRenderer::new();
        let result = renderer.render_page(&text_page("x"));
        assert!(matches!(result, Err(RenderError::Other(_))));
    }
}
