//! URL normalization into the canonical component tuple.
//!
//! Every lookup and every stored preference goes through [`UrlParts::parse`]
//! so that two spellings of the same location compare equal: the host is
//! lowercased, the path loses its trailing slash (root stays `/`), and query
//! and fragment keep their leading `?`/`#` or collapse to the empty string.

use thiserror::Error;

/// Failure to turn a raw URL string into a component tuple.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid URL: {0}")]
    Invalid(#[from] url::ParseError),
    /// Syntactically valid but has no authority (e.g. `mailto:`, `data:`).
    #[error("URL has no host: {0}")]
    NoHost(String),
}

/// Normalized components of an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    /// Lowercase authority, including an explicit non-default port.
    pub host: String,
    /// Always starts with `/`; no trailing slash except root.
    pub path: String,
    /// Includes the leading `?`, or empty.
    pub query: String,
    /// Includes the leading `#`, or empty.
    pub fragment: String,
}

impl UrlParts {
    /// Parse and normalize a raw URL string.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let parsed = url::Url::parse(raw)?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ParseError::NoHost(raw.to_string()))?;
        // url::Url::port() is None when the port is the scheme default,
        // matching what the authority looks like in the address bar.
        let host = match parsed.port() {
            Some(port) => format!("{}:{}", host.to_ascii_lowercase(), port),
            None => host.to_ascii_lowercase(),
        };

        let query = match parsed.query() {
            Some(q) if !q.is_empty() => format!("?{q}"),
            _ => String::new(),
        };
        let fragment = match parsed.fragment() {
            Some(f) if !f.is_empty() => format!("#{f}"),
            _ => String::new(),
        };

        Ok(Self {
            host,
            path: normalize_path(parsed.path()),
            query,
            fragment,
        })
    }
}

/// Normalize a URL path: force a leading `/`, strip the trailing slash
/// unless the path is exactly the root.
pub fn normalize_path(path: &str) -> String {
    let mut path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    path
}

/// True for the http(s) URLs the resolver handles; everything else
/// (about:, file:, moz-extension:, ...) is ignored by the event layer.
pub fn is_http_scheme(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}
