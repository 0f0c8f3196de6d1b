//! HTTP transport types shared by the resolvers and the `Transport` seam.
//!
//! # Design
//! Requests and responses are plain data. Resolvers build an `HttpRequest`
//! and parse an `HttpResponse` without touching the network, so both halves
//! can be tested without a server. The only code that performs I/O is a
//! `Transport` implementation.
//!
//! Query parameters are kept as decoded pairs; encoding them onto the URL is
//! the transport's job. Response bodies stay raw bytes so that a body which
//! is not UTF-8 is a parse problem, not a transport one.

/// A GET request described as plain data.
///
/// Built by `user::build_request` and `review::build_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}
