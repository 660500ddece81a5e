// Configuration module entry point
// Loads the immutable server configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::ServeError;

pub use state::AppState;
pub use types::{Config, LoggingConfig, ServerConfig};

/// Config file looked up in the working directory (extension optional)
pub const DEFAULT_CONFIG_FILE: &str = "isoserve";

/// Environment variable prefix, e.g. `ISOSERVE_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "ISOSERVE";

impl Config {
    /// Load configuration from the default file and environment
    pub fn load() -> Result<Self, ServeError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; defaults serve `build/web` on port 8000.
    pub fn load_from(config_path: &str) -> Result<Self, ServeError> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.root", defaults.server.root)?
            .set_default("logging.access_log", defaults.logging.access_log)?
            .set_default("logging.access_log_format", defaults.logging.access_log_format)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServeError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ServeError::Config(format!("Invalid address: {e}")))
    }

    /// Resolve the served root against `base` and require it to be a directory
    pub fn resolve_root(&self, base: &Path) -> Result<PathBuf, ServeError> {
        let path = base.join(&self.server.root);
        let canonical = path.canonicalize().map_err(|source| ServeError::RootDir {
            path: path.clone(),
            source,
        })?;
        if !canonical.is_dir() {
            return Err(ServeError::RootDir {
                path,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            });
        }
        Ok(canonical)
    }
}
