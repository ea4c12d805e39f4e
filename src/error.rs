//! Unified error type for whole-document generation.

use factura_compose::ComposeError;
use factura_render_core::RenderError;
use thiserror::Error;

/// The main error enum for all high-level engine operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Composition error: {0}")]
    Compose(#[from] ComposeError),
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
    #[error("Worker thread failed: {0}")]
    Worker(String),
}

impl From<factura_types::GeometryError> for PipelineError {
    fn from(e: factura_types::GeometryError) -> Self {
        PipelineError::Config(e.to_string())
    }
}
