//! Resource loading for the factura engine.
//!
//! The composer resolves issuer logos (and any other asset referenced by
//! a locator string) through the [`ResourceProvider`] trait so it never
//! touches the filesystem directly. Two providers ship here:
//!
//! - [`InMemoryResourceProvider`]: pre-populated byte store, used by the
//!   tests and by callers embedding their assets.
//! - [`FilesystemResourceProvider`]: loads relative to a base directory
//!   and refuses paths escaping it.
//!
//! Loads are a single best-effort read: a missing or unreadable resource
//! fails fast with a typed error, which the composer treats as "no logo".

mod filesystem;
mod memory;

pub use filesystem::FilesystemResourceProvider;
pub use memory::InMemoryResourceProvider;

use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Shared, immutable resource bytes.
pub type SharedResourceData = Arc<Vec<u8>>;

#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),
}

/// A source of named resources.
pub trait ResourceProvider: Send + Sync + Debug {
    /// Load a resource by its locator. One-shot; implementations must
    /// not block indefinitely.
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    /// Whether the locator resolves to a loadable resource.
    fn exists(&self, path: &str) -> bool;

    /// Human-readable provider name for log messages.
    fn name(&self) -> &'static str;
}
