//! Request handler module
//!
//! Composes the static file responder with the root path rewrite and the
//! fixed response headers.

pub mod listing;
pub mod rewrite;
pub mod router;
pub mod service;
pub mod static_files;

// Re-export main entry point
pub use rewrite::PathRewrite;
pub use router::handle_request;
pub use service::FileService;
pub use static_files::StaticFiles;
