//! One-shot background generation.
//!
//! Generation is user-triggered and CPU-bound; each invocation gets its
//! own worker thread and shares no state with concurrent invocations.
//! There are no retries: on failure the caller re-invokes from scratch.

use crate::error::PipelineError;
use crate::pipeline;
use crate::request::DocumentRequest;
use factura_resource::ResourceProvider;
use factura_types::PageGeometry;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Handle to a running generation. Dropping it detaches the worker;
/// the temp-file discipline in the pipeline keeps a torn-down
/// generation from leaving a partial output behind.
pub struct GenerationHandle {
    handle: JoinHandle<Result<PathBuf, PipelineError>>,
}

impl GenerationHandle {
    /// Blocks until the worker finishes and returns its result.
    pub fn join(self) -> Result<PathBuf, PipelineError> {
        self.handle
            .join()
            .map_err(|_| PipelineError::Worker("generation worker panicked".to_string()))?
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns one generation on a dedicated worker thread, writing the
/// output into `dir`.
pub fn spawn_generate(
    request: DocumentRequest,
    geometry: PageGeometry,
    resources: Arc<dyn ResourceProvider>,
    dir: PathBuf,
) -> GenerationHandle {
    let handle = thread::spawn(move || {
        pipeline::generate_to_file(&request, geometry, resources.as_ref(), &dir)
    });
    GenerationHandle { handle }
}
