//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! request pipeline: MIME detection, date handling, fixed headers and
//! response builders.

pub mod cache;
pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use headers::FixedHeaders;
pub use response::{
    build_304_response, build_403_response, build_404_response, build_405_response,
    build_error_response, build_file_response, build_html_response, build_redirect_response,
};
