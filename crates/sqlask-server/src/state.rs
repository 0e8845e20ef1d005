use sqlask_core::pipeline::AskService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AskService>,
    /// Front page on disk; the built-in page is served when unset.
    pub index_path: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(service: AskService) -> Self {
        Self {
            service: Arc::new(service),
            index_path: None,
            static_dir: None,
        }
    }

    pub fn with_index_path(mut self, path: Option<PathBuf>) -> Self {
        self.index_path = path;
        self
    }

    pub fn with_static_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.static_dir = dir;
        self
    }
}
