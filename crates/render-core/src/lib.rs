//! Core rendering abstractions.
//!
//! This crate defines the [`PageRenderer`] trait that output backends
//! implement, plus the shared [`RenderError`] type. The composer and
//! layout engine stay backend-agnostic: they emit abstract pages, and a
//! renderer consumes each page exactly once, in order.

mod error;
mod traits;

pub use error::RenderError;
pub use traits::PageRenderer;

/// Convert a top-origin layout y coordinate to the PDF bottom-origin
/// convention.
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}
