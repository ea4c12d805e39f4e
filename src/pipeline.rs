//! Compose-then-render pipeline.

use crate::error::PipelineError;
use crate::request::DocumentRequest;
use factura_compose::Composer;
use factura_render_core::PageRenderer;
use factura_render_lopdf::LopdfRenderer;
use factura_resource::ResourceProvider;
use factura_types::PageGeometry;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Generates the document into an in-memory PDF buffer.
pub fn generate(
    request: &DocumentRequest,
    geometry: PageGeometry,
    resources: &dyn ResourceProvider,
) -> Result<Vec<u8>, PipelineError> {
    let composer = Composer::new(geometry, resources);
    let pages = composer.compose(
        &request.header,
        &request.issuer,
        request.recipient.as_ref(),
        &request.line_items,
    )?;
    log::debug!(
        "composed {} page(s) for document {}",
        pages.len(),
        request.header.id
    );
    Ok(LopdfRenderer::render_to_buffer(&pages, geometry)?)
}

/// Generates the document into `dir`, named per the document-type
/// policy (e.g. `Facture_42.pdf`).
///
/// The PDF is streamed into a temporary file in the same directory and
/// only persisted under its final name when rendering completed; a
/// failed or interrupted generation never leaves a partial file at a
/// user-visible path.
pub fn generate_to_file(
    request: &DocumentRequest,
    geometry: PageGeometry,
    resources: &dyn ResourceProvider,
    dir: &Path,
) -> Result<PathBuf, PipelineError> {
    let composer = Composer::new(geometry, resources);
    let pages = composer.compose(
        &request.header,
        &request.issuer,
        request.recipient.as_ref(),
        &request.line_items,
    )?;

    let tmp = NamedTempFile::new_in(dir)?;
    let mut renderer: Box<LopdfRenderer<NamedTempFile>> = Box::new(LopdfRenderer::new());
    renderer.begin_document(tmp, geometry)?;
    for page in &pages {
        renderer.render_page(page)?;
    }
    let tmp = renderer.finish()?;

    let target = dir.join(request.file_name());
    let persisted = tmp.persist(&target).map_err(|e| PipelineError::Io(e.error))?;
    drop(persisted);
    log::debug!("wrote {}", target.display());
    Ok(target)
}
