//! Fixed response headers
//!
//! Headers attached to every outgoing response, overriding anything the
//! file responder set under the same name.

use hyper::header::{HeaderMap, HeaderName, HeaderValue};

pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "access-control-allow-origin";
pub const CROSS_ORIGIN_EMBEDDER_POLICY: &str = "cross-origin-embedder-policy";
pub const CROSS_ORIGIN_OPENER_POLICY: &str = "cross-origin-opener-policy";

/// Ordered set of headers applied to responses after they are built
#[derive(Debug, Clone, Default)]
pub struct FixedHeaders {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl FixedHeaders {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Headers that enable `SharedArrayBuffer` and friends in browsers
    pub fn cross_origin_isolation() -> Self {
        Self::new()
            .with(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
            .with(CROSS_ORIGIN_EMBEDDER_POLICY, "require-corp")
            .with(CROSS_ORIGIN_OPENER_POLICY, "same-origin")
    }

    /// Add a header; both parts must be static, valid header text
    #[must_use]
    pub fn with(mut self, name: &'static str, value: &'static str) -> Self {
        self.entries.push((
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
        self
    }

    /// Insert every fixed header, replacing existing values
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.entries {
            headers.insert(name.clone(), value.clone());
        }
    }
}
