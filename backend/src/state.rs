//! Shared application state injected into every handler as `web::Data`.

use crate::store::RecordStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Cheap to clone: the store and settings are reference counted, so every
/// actix worker shares the same collection locks.
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    fonts_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: RecordStore, fonts_dir: impl Into<PathBuf>) -> Self {
        AppState {
            store,
            fonts_dir: Arc::new(fonts_dir.into()),
        }
    }

    /// Where the PDF exporter looks for its TTF files.
    pub fn fonts_dir(&self) -> &Path {
        &self.fonts_dir
    }
}
