use crate::{ResourceError, ResourceProvider, SharedResourceData};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// An in-memory resource store, pre-populated before use.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a resource under the given locator.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path = path.into();
        let mut resources = self.resources.write().map_err(|_| ResourceError::LoadFailed {
            path: path.clone(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources.insert(path, Arc::new(data));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.resources.read().map(|r| r.is_empty()).unwrap_or(true)
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self.resources.read().map_err(|_| ResourceError::LoadFailed {
            path: path.to_string(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources.read().map(|r| r.contains_key(path)).unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}
