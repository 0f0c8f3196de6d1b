//! The I/O seam between resolvers and the network.
//!
//! # Design
//! Resolvers only see the `Transport` trait, so tests can substitute a
//! recording double. `UreqTransport` is the blocking implementation used by
//! `VouchleyClient::new`. It never turns a status code into an error: every
//! response is handed back as data and the resolver decides what a non-200
//! status means. Bodies are read as bytes; decoding is left to the resolver.

use std::time::Duration;

use crate::http::{HttpRequest, HttpResponse};

/// Failure to obtain a response at all.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Executes one `HttpRequest` and returns the complete response.
///
/// Implementations must read the whole body before returning so the
/// underlying connection is released on every path.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(&request.url);
        for (key, value) in &request.query {
            builder = builder.query(key.as_str(), value.as_str());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call()?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response.body_mut().read_to_vec()?;

        Ok(HttpResponse { status, headers, body })
    }
}
