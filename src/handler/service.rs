//! File service composition
//!
//! Wraps the base [`StaticFiles`] responder with a path rewrite applied before
//! resolution and a fixed header set applied to every finished response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use hyper::{Method, Request, Response};
use std::path::PathBuf;

use crate::handler::rewrite::PathRewrite;
use crate::handler::static_files::{RequestContext, StaticFiles};
use crate::http::{self, FixedHeaders};
use crate::logger;

#[derive(Debug, Clone)]
pub struct FileService {
    files: StaticFiles,
    rewrite: PathRewrite,
    headers: FixedHeaders,
}

impl FileService {
    pub const fn new(files: StaticFiles, rewrite: PathRewrite, headers: FixedHeaders) -> Self {
        Self {
            files,
            rewrite,
            headers,
        }
    }

    /// Serve `root` with `/` mapped to `/index.html` and cross-origin isolation headers
    pub fn cross_origin_isolated(root: impl Into<PathBuf>) -> Self {
        Self::new(
            StaticFiles::new(root),
            PathRewrite::root_to_index(),
            FixedHeaders::cross_origin_isolation(),
        )
    }

    /// Produce the response for `req`, fixed headers included
    pub async fn respond<B>(&self, req: &Request<B>) -> Response<Full<Bytes>> {
        let mut response = self.dispatch(req).await;
        self.headers.apply(response.headers_mut());
        response
    }

    async fn dispatch<B>(&self, req: &Request<B>) -> Response<Full<Bytes>> {
        if let Some(resp) = check_http_method(req.method()) {
            return resp;
        }

        let headers = req.headers();
        let ctx = RequestContext {
            path: self.rewrite.apply(collapse_leading_slashes(req.uri().path())),
            query: req.uri().query(),
            is_head: req.method() == Method::HEAD,
            if_modified_since: header_string(headers, IF_MODIFIED_SINCE),
            if_none_match: header_string(headers, IF_NONE_MATCH),
        };

        self.files.serve(&ctx).await
    }
}

/// Check HTTP method and return 405 for anything but GET/HEAD
pub fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Reduce a run of leading slashes to one
///
/// A redirect `Location` must never start with `//`, which browsers read as
/// a protocol-relative URL for another host.
fn collapse_leading_slashes(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    let leading = path.len() - trimmed.len();
    if leading > 1 {
        &path[leading - 1..]
    } else {
        path
    }
}

fn header_string(
    headers: &hyper::HeaderMap,
    name: hyper::header::HeaderName,
) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    const ISOLATION: [(&str, &str); 3] = [
        ("access-control-allow-origin", "*"),
        ("cross-origin-embedder-policy", "require-corp"),
        ("cross-origin-opener-policy", "same-origin"),
    ];

    fn service() -> (tempfile::TempDir, FileService) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), b"<p>game</p>").unwrap();
        std::fs::create_dir(dir.path().join("levels")).unwrap();
        let service = FileService::cross_origin_isolated(dir.path());
        (dir, service)
    }

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    fn assert_isolated(response: &Response<Full<Bytes>>) {
        for (name, value) in ISOLATION {
            let values: Vec<_> = response.headers().get_all(name).iter().collect();
            assert_eq!(values, vec![value], "header {name} on {}", response.status());
        }
    }

    async fn body(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn test_allowed_methods() {
        assert!(check_http_method(&Method::GET).is_none());
        assert!(check_http_method(&Method::HEAD).is_none());
    }

    #[test]
    fn test_rejected_methods() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS, Method::PATCH] {
            let response = check_http_method(&method).unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        }
    }

    #[test]
    fn test_collapse_leading_slashes() {
        assert_eq!(collapse_leading_slashes("/"), "/");
        assert_eq!(collapse_leading_slashes("/levels"), "/levels");
        assert_eq!(collapse_leading_slashes("//levels"), "/levels");
        assert_eq!(collapse_leading_slashes("///evil.com/x//y"), "/evil.com/x//y");
        assert_eq!(collapse_leading_slashes("//"), "/");
    }

    #[tokio::test]
    async fn test_double_slash_redirect_stays_on_host() {
        let (_dir, service) = service();
        let response = service.respond(&request(Method::GET, "//levels")).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[hyper::header::LOCATION], "/levels/");
        assert_isolated(&response);
    }

    #[tokio::test]
    async fn test_root_matches_index() {
        let (_dir, service) = service();
        let root = service.respond(&request(Method::GET, "/")).await;
        let index = service.respond(&request(Method::GET, "/index.html")).await;
        assert_eq!(root.status(), StatusCode::OK);
        assert_eq!(root.headers(), index.headers());
        assert_eq!(body(root).await, body(index).await);
    }

    #[tokio::test]
    async fn test_headers_on_every_outcome() {
        let (_dir, service) = service();
        let cases = [
            (Method::GET, "/", StatusCode::OK),
            (Method::HEAD, "/index.html", StatusCode::OK),
            (Method::GET, "/missing", StatusCode::NOT_FOUND),
            (Method::GET, "/levels", StatusCode::MOVED_PERMANENTLY),
            (Method::GET, "/levels/", StatusCode::OK),
            (Method::POST, "/", StatusCode::METHOD_NOT_ALLOWED),
            (Method::DELETE, "/missing", StatusCode::METHOD_NOT_ALLOWED),
            (Method::OPTIONS, "/index.html", StatusCode::METHOD_NOT_ALLOWED),
        ];
        for (method, uri, status) in cases {
            let response = service.respond(&request(method, uri)).await;
            assert_eq!(response.status(), status, "{uri}");
            assert_isolated(&response);
        }
    }

    #[tokio::test]
    async fn test_not_modified_keeps_headers() {
        let (_dir, service) = service();
        let first = service.respond(&request(Method::GET, "/index.html")).await;
        let last_modified = first.headers()[hyper::header::LAST_MODIFIED].clone();

        let req = Request::builder()
            .uri("/")
            .header(IF_MODIFIED_SINCE, last_modified)
            .body(())
            .unwrap();
        let response = service.respond(&req).await;
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert_isolated(&response);
    }

    #[tokio::test]
    async fn test_query_does_not_affect_rewrite() {
        let (_dir, service) = service();
        let response = service.respond(&request(Method::GET, "/?v=1")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await.as_ref(), b"<p>game</p>");
    }
}
