//! Shared "fetch a JSON resource" logic for the user and review resolvers.
//!
//! Both lookups follow the same policy:
//! - transport failure is `ApiError::RemoteFetch`;
//! - any status other than 200 is a miss, `Ok(None)`;
//! - a 200 body that does not deserialize is `ApiError::MalformedResponse`.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, Resource};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

const USER_AGENT: &str = concat!("vouchley-core/", env!("CARGO_PKG_VERSION"));

/// Build a GET for `resource` carrying exactly one query parameter.
pub(crate) fn build_request(config: &ClientConfig, resource: Resource, key: &str, value: String) -> HttpRequest {
    let mut headers = vec![
        ("accept".to_string(), "application/json".to_string()),
        ("user-agent".to_string(), USER_AGENT.to_string()),
    ];
    if let Some(api_key) = config.api_key() {
        headers.push(("authorization".to_string(), format!("Bearer {api_key}")));
    }

    HttpRequest {
        url: format!("{}{}", config.base_url(), resource.path()),
        query: vec![(key.to_string(), value)],
        headers,
    }
}

pub(crate) fn parse_response<T: DeserializeOwned>(
    resource: Resource,
    response: HttpResponse,
) -> Result<Option<T>, ApiError> {
    if response.status != 200 {
        if response.status >= 500 {
            warn!(%resource, status = response.status, "lookup failed server-side, treating as miss");
        } else {
            debug!(%resource, status = response.status, "lookup miss");
        }
        return Ok(None);
    }

    serde_json::from_slice(&response.body)
        .map(Some)
        .map_err(|e| ApiError::MalformedResponse {
            resource,
            message: e.to_string(),
        })
}

pub(crate) fn fetch<T, X>(transport: &X, resource: Resource, request: &HttpRequest) -> Result<Option<T>, ApiError>
where
    T: DeserializeOwned,
    X: Transport + ?Sized,
{
    debug!(%resource, url = %request.url, "sending lookup request");

    let response = transport.send(request).map_err(|e| ApiError::RemoteFetch {
        resource,
        message: e.to_string(),
    })?;

    parse_response(resource, response)
}
