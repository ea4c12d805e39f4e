//! # factura
//!
//! Document generation engine for invoices, quotes and delivery notes.
//!
//! The engine takes a transaction header, an issuer snapshot, an
//! optional recipient and a normalized list of line items, composes
//! them into abstract pages of draw instructions, and renders the pages
//! to a PDF. Totals are always derived from the line items at
//! generation time under the active document-type policy, so the
//! printed table and the printed totals can never disagree.
//!
//! ## Design principle
//!
//! Layout decisions and drawing are kept apart: `factura-compose` and
//! `factura-layout` are pure and unit-testable without any rendering
//! surface, and `factura-render-lopdf` is a thin backend consuming the
//! instruction pages. All data is passed as explicit arguments; the
//! engine holds no process-wide state.

pub use factura_types as types;
pub use factura_doc as doc;
pub use factura_layout as layout;
pub use factura_compose as compose;
pub use factura_resource as resource;
pub use factura_render_core as render_core;
pub use factura_render_lopdf as render_lopdf;

pub mod config;
pub mod error;
pub mod pipeline;
pub mod request;
pub mod worker;

// Re-export commonly used types from the member crates
pub use factura_doc::{
    DocumentHeader, DocumentKind, DocumentPolicy, DocumentStatus, IssuerIdentity, LineItem,
    RecipientIdentity, Totals,
};
pub use factura_layout::Page;
pub use factura_resource::{
    FilesystemResourceProvider, InMemoryResourceProvider, ResourceProvider,
};
pub use factura_types::PageGeometry;

pub use config::EngineConfig;
pub use error::PipelineError;
pub use pipeline::{generate, generate_to_file};
pub use request::DocumentRequest;
pub use worker::spawn_generate;
