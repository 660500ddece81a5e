//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: dispatch to the file service
//! and access logging.

use crate::config::AppState;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{REFERER, USER_AGENT};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    // Only the head is needed; GET/HEAD bodies are ignored
    let (parts, body) = req.into_parts();
    drop(body);
    let req = Request::from_parts(parts, ());
    let response = state.service.respond(&req).await;

    if state.config.logging.access_log {
        let entry = access_entry(&req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn access_entry(
    req: &Request<()>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header_value(req, REFERER);
    entry.user_agent = header_value(req, USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn header_value(req: &Request<()>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::http;
    use hyper::StatusCode;

    #[test]
    fn test_access_entry_fields() {
        let req = Request::builder()
            .uri("/game.wasm?v=3")
            .header(USER_AGENT, "test-agent")
            .body(())
            .unwrap();
        let response = http::build_file_response(Bytes::from_static(b"abcd"), "application/wasm", None, false);
        let entry = access_entry(&req, &response, "127.0.0.1:5000".parse().unwrap(), Instant::now());

        assert_eq!(entry.remote_addr, "127.0.0.1");
        assert_eq!(entry.method, "GET");
        assert_eq!(entry.path, "/game.wasm");
        assert_eq!(entry.query.as_deref(), Some("v=3"));
        assert_eq!(entry.status, 200);
        assert_eq!(entry.body_bytes, 4);
        assert_eq!(entry.user_agent.as_deref(), Some("test-agent"));
        assert!(entry.referer.is_none());
    }

    #[tokio::test]
    async fn test_handle_request_uses_state() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), b"hi").unwrap();
        let mut config = Config::default();
        config.logging.access_log = false;
        let state = Arc::new(AppState::new(&config, dir.path().to_path_buf()));

        let req = Request::builder().uri("/").body(()).unwrap();
        let response = handle_request(req, state, "127.0.0.1:1".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["cross-origin-opener-policy"], "same-origin");
    }
}
