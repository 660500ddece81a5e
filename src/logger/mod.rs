//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle lines on stdout
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Line printed after the interrupt, preceded by a blank line
pub const STOPPED_MESSAGE: &str = "Server stopped.";

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => eprintln!("{message}"),
    }
}

/// The two startup lines for the bound address
pub fn serving_lines(addr: &SocketAddr) -> [String; 2] {
    [
        format!("Serving at http://localhost:{}", addr.port()),
        "Press Ctrl+C to stop the server".to_string(),
    ]
}

pub fn log_server_start(addr: &SocketAddr) {
    for line in serving_lines(addr) {
        println!("{line}");
    }
}

pub fn log_server_stopped() {
    println!("\n{STOPPED_MESSAGE}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serving_lines_use_bound_port() {
        let addr: SocketAddr = "0.0.0.0:8000".parse().unwrap();
        let [first, second] = serving_lines(&addr);
        assert_eq!(first, "Serving at http://localhost:8000");
        assert_eq!(second, "Press Ctrl+C to stop the server");
    }
}
