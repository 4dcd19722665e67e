use crate::constants::AWS_QUERY_ENCODE_SET;
use http::Method;
use percent_encoding::utf8_percent_encode;
use std::collections::BTreeMap;

/// An unsigned request descriptor: the already-canonical inputs of one
/// signing operation.
///
/// The URI path must be percent-encoded and the query string sorted by
/// parameter name before they get here ([`canonical_query_string`] does the
/// latter for callers starting from raw pairs). Header names are lower-cased
/// and values trimmed on insertion; the `BTreeMap` keeps the lexicographic
/// order the canonical form requires.
///
/// Descriptors are built fresh for every outbound request and consumed by
/// the signing pipeline immediately.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    canonical_uri: String,
    canonical_query: String,
    headers: BTreeMap<String, String>,
    payload_hash: String,
}

impl RequestDescriptor {
    /// Create a descriptor with no query string and no headers.
    ///
    /// `payload_hash` is the hex SHA-256 of the request body, or of the
    /// empty byte sequence when there is no body.
    pub fn new(
        method: Method,
        canonical_uri: impl Into<String>,
        payload_hash: impl Into<String>,
    ) -> Self {
        Self {
            method,
            canonical_uri: canonical_uri.into(),
            canonical_query: String::new(),
            headers: BTreeMap::new(),
            payload_hash: payload_hash.into(),
        }
    }

    /// Set an already-canonical query string (sorted, percent-encoded).
    pub fn with_query(mut self, canonical_query: impl Into<String>) -> Self {
        self.canonical_query = canonical_query.into();
        self
    }

    /// Add a header. The name is lower-cased and the value stripped of
    /// leading/trailing spaces; inserting the same name twice keeps the
    /// last value.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_lowercase(), value.trim_matches(' ').to_string());
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The canonical URI path.
    pub fn canonical_uri(&self) -> &str {
        &self.canonical_uri
    }

    /// The canonical query string, empty if none.
    pub fn canonical_query(&self) -> &str {
        &self.canonical_query
    }

    /// The hex-encoded payload hash.
    pub fn payload_hash(&self) -> &str {
        &self.payload_hash
    }

    /// Look up a canonicalized header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// The canonical headers block: one `name:value` line per header,
    /// each terminated by a newline, sorted ascending by name.
    pub fn canonical_headers(&self) -> String {
        let mut s = String::with_capacity(64);
        for (name, value) in &self.headers {
            s.push_str(name);
            s.push(':');
            s.push_str(value);
            s.push('\n');
        }
        s
    }

    /// The signed-header list: semicolon-joined lower-cased names, in the
    /// same order as [`canonical_headers`](Self::canonical_headers).
    pub fn signed_headers(&self) -> String {
        self.headers
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Sort query pairs by parameter name and percent-encode them into a
/// canonical query string.
pub fn canonical_query_string(pairs: &[(String, String)]) -> String {
    let mut pairs = pairs.to_vec();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
