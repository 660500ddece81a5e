//! Startup error types
//!
//! Per-request failures never reach this type; they become HTTP status codes.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that stop the server before or while it starts
#[derive(Error, Debug)]
pub enum ServeError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Served directory is missing or unusable
    #[error("Cannot serve directory {}: {source}", path.display())]
    RootDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Listening socket could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// Runtime or log setup failure
    #[error("IO error: {0}")]
    Runtime(#[from] std::io::Error),
}

impl From<config::ConfigError> for ServeError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_message() {
        let err = ServeError::Bind {
            addr: "0.0.0.0:8000".parse().unwrap(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use"),
        };
        assert_eq!(err.to_string(), "Failed to bind 0.0.0.0:8000: address in use");
    }

    #[test]
    fn test_root_dir_message() {
        let err = ServeError::RootDir {
            path: PathBuf::from("/srv/build/web"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Cannot serve directory /srv/build/web: missing");
    }
}
