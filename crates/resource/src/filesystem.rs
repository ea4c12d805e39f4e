//! Filesystem-backed resource provider.
//!
//! Locators are resolved relative to a base directory, typically the
//! application's asset folder. Resolved paths must stay inside the base
//! directory; absolute locators and `..` traversal are rejected.

use crate::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base for containment checks.
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self { base_path: base, canonical_base: canonical }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolves a locator under the base directory, or `None` when the
    /// locator is absolute or would escape the base.
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(path);

        if let (Ok(canonical), Some(base)) =
            (full_path.canonicalize(), self.canonical_base.as_ref())
        {
            if canonical.starts_with(base) {
                return Some(canonical);
            }
            return None;
        }

        // The target may not exist yet; at minimum reject any `..` component.
        if Path::new(path).components().any(|c| matches!(c, Component::ParentDir)) {
            return None;
        }

        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{path} (path traversal blocked)")))?;

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed { path: path.to_string(), message: e.to_string() }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path_safe(path).map(|p| p.exists()).unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
