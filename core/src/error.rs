//! Error types for the Vouchley client.
//!
//! # Design
//! A lookup miss is not an error: resolvers return `Ok(None)` for any
//! non-200 status. What remains are two failure kinds callers need to tell
//! apart, "the network is down" (`RemoteFetch`) and "the service sent
//! something we cannot map" (`MalformedResponse`), plus configuration errors
//! raised before any request is made.

use std::fmt;

use thiserror::Error;

/// The kind of record a lookup was resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Review,
}

impl Resource {
    /// Endpoint path relative to the service base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::User => "/api/v1/user",
            Resource::Review => "/api/v1/review",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::User => f.write_str("user"),
            Resource::Review => f.write_str("review"),
        }
    }
}

/// Errors returned by `VouchleyClient` lookups and construction.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response: DNS, refused connection,
    /// timeout, or I/O failure while reading the body.
    #[error("{resource} retrieval failed: {message}")]
    RemoteFetch { resource: Resource, message: String },

    /// The service answered 200 but the body is not the expected JSON shape.
    #[error("malformed {resource} response: {message}")]
    MalformedResponse { resource: Resource, message: String },

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// The resource being resolved, if the error came from a lookup.
    pub fn resource(&self) -> Option<Resource> {
        match self {
            ApiError::RemoteFetch { resource, .. } | ApiError::MalformedResponse { resource, .. } => {
                Some(*resource)
            }
            ApiError::InvalidConfig(_) => None,
        }
    }
}
