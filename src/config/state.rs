// Application state module
// Read-only state shared by every connection

use std::path::PathBuf;

use super::types::Config;
use crate::handler::FileService;

/// Application state
pub struct AppState {
    pub config: Config,
    pub service: FileService,
}

impl AppState {
    /// Build state for serving `root` with the default isolation pipeline
    pub fn new(config: &Config, root: PathBuf) -> Self {
        Self {
            config: config.clone(),
            service: FileService::cross_origin_isolated(root),
        }
    }
}
