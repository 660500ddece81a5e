//! isoserve: a local static file server for cross-origin isolated pages
//!
//! Serves a fixed directory over HTTP/1.x, maps `/` to `/index.html`, and
//! attaches `Access-Control-Allow-Origin`, `Cross-Origin-Embedder-Policy` and
//! `Cross-Origin-Opener-Policy` to every response so pages can use
//! `SharedArrayBuffer` (threaded WebAssembly builds, for example).

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::ServeError;
