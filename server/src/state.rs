use std::sync::Arc;

use crate::backend::OcrBackend;

/// Decoded image size accepted by the relay when no limit is configured.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn OcrBackend>,
    pub max_image_bytes: usize,
}

impl AppState {
    pub fn new(backend: Arc<dyn OcrBackend>, max_image_bytes: usize) -> Self {
        Self {
            backend,
            max_image_bytes,
        }
    }

    /// Request body limit: base64 inflates the image by a third, plus room for the JSON envelope.
    pub fn body_limit(&self) -> usize {
        self.max_image_bytes
            .saturating_add(self.max_image_bytes / 3)
            .saturating_add(64 * 1024)
    }
}
