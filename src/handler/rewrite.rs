//! Path rewrite rules
//!
//! Exact-match substitutions applied to the request path before it is
//! resolved against the served directory.

/// Ordered list of exact path substitutions; the first match wins
#[derive(Debug, Clone, Default)]
pub struct PathRewrite {
    rules: Vec<(String, String)>,
}

impl PathRewrite {
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// `/` serves `/index.html`
    pub fn root_to_index() -> Self {
        Self::new().exact("/", "/index.html")
    }

    /// Add a rule replacing `from` with `to` when the path equals `from`
    #[must_use]
    pub fn exact(mut self, from: &str, to: &str) -> Self {
        self.rules.push((from.to_string(), to.to_string()));
        self
    }

    /// Rewrite `path`, or return it unchanged when no rule matches
    pub fn apply<'a>(&'a self, path: &'a str) -> &'a str {
        self.rules
            .iter()
            .find(|(from, _)| from == path)
            .map_or(path, |(_, to)| to.as_str())
    }
}
