//! Static file serving module
//!
//! Resolves request paths inside the served directory and builds file,
//! directory and error responses.

use crate::handler::listing;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files served in place of a directory, in lookup order
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Request fields the file responder needs
pub struct RequestContext<'a> {
    /// Request path after rewriting, still percent-encoded
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub if_none_match: Option<String>,
}

/// Base file responder over a single directory
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = root.canonicalize().unwrap_or(root);
        Self { root }
    }

    /// Map a URL path to a location under the root
    ///
    /// The path is percent-decoded and normalized lexically: `.` segments and
    /// empty segments are dropped and `..` never climbs above the root.
    /// Returns `None` for paths that can never name a file (embedded NUL).
    pub fn translate_path(&self, url_path: &str) -> Option<PathBuf> {
        let url_path = url_path.split(['?', '#']).next().unwrap_or_default();
        let decoded = percent_decode_str(url_path).decode_utf8_lossy();
        if decoded.contains('\0') {
            return None;
        }

        let mut segments: Vec<&str> = Vec::new();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }

        let mut path = self.root.clone();
        path.extend(segments);
        Some(path)
    }

    /// Serve the request described by `ctx`
    pub async fn serve(&self, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
        let Some(path) = self.translate_path(ctx.path) else {
            return http::build_404_response(ctx.is_head);
        };

        // File not found is common (404), no need to log at warning level
        let Ok(metadata) = fs::metadata(&path).await else {
            return http::build_404_response(ctx.is_head);
        };

        if !self.is_contained(&path).await {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {} -> {}",
                ctx.path,
                path.display()
            ));
            return http::build_403_response(ctx.is_head);
        }

        if metadata.is_dir() {
            return self.serve_directory(ctx, &path).await;
        }

        // A file addressed like a directory does not exist
        if ctx.path.ends_with('/') {
            return http::build_404_response(ctx.is_head);
        }

        serve_file(ctx, &path, &metadata).await
    }

    async fn serve_directory(&self, ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
        if !ctx.path.ends_with('/') {
            let location = match ctx.query {
                Some(query) => format!("{}/?{query}", ctx.path),
                None => format!("{}/", ctx.path),
            };
            return http::build_redirect_response(&location);
        }

        for index in INDEX_FILES {
            let candidate = dir.join(index);
            if let Ok(metadata) = fs::metadata(&candidate).await {
                if metadata.is_file() && self.is_contained(&candidate).await {
                    return serve_file(ctx, &candidate, &metadata).await;
                }
            }
        }

        match listing::render_listing(dir, ctx.path).await {
            Ok(html) => http::build_html_response(html, ctx.is_head),
            Err(e) => {
                logger::log_warning(&format!(
                    "Cannot list directory '{}': {e}",
                    dir.display()
                ));
                http::build_error_response(
                    hyper::StatusCode::NOT_FOUND,
                    Some("No permission to list directory"),
                    ctx.is_head,
                )
            }
        }
    }

    /// Security: ensure the canonical target stays within the root
    async fn is_contained(&self, path: &Path) -> bool {
        fs::canonicalize(path)
            .await
            .is_ok_and(|canonical| canonical.starts_with(&self.root))
    }
}

async fn serve_file(
    ctx: &RequestContext<'_>,
    path: &Path,
    metadata: &Metadata,
) -> Response<Full<Bytes>> {
    let modified = metadata.modified().ok();
    let last_modified = modified.map(cache::format_http_date);

    if let (Some(modified), Some(last_modified)) = (modified, last_modified.as_deref()) {
        if cache::is_not_modified(
            ctx.if_modified_since.as_deref(),
            ctx.if_none_match.as_deref(),
            modified,
        ) {
            return http::build_304_response(last_modified);
        }
    }

    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                path.display(),
                e
            ));
            return http::build_404_response(ctx.is_head);
        }
    };

    http::build_file_response(
        Bytes::from(content),
        mime::content_type_for(path),
        last_modified.as_deref(),
        ctx.is_head,
    )
}
