//! Review records and the review resolver.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ApiError, Resource};
use crate::http::{HttpRequest, HttpResponse};
use crate::resolver;
use crate::transport::Transport;

/// Snapshot of a review left by `sender` for `receiver`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    id: Uuid,
    receiver: Uuid,
    sender: Uuid,
    value: f64,
    rating: i32,
    time_sent: i64,
    message: String,
    #[serde(default)]
    reply: Option<String>,
    platform: String,
    #[serde(default)]
    product: Option<String>,
}

impl Review {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Id of the user the review is about.
    pub fn receiver(&self) -> Uuid {
        self.receiver
    }

    /// Id of the user who wrote the review.
    pub fn sender(&self) -> Uuid {
        self.sender
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    /// Milliseconds since the Unix epoch.
    pub fn time_sent(&self) -> i64 {
        self.time_sent
    }

    /// `None` when the timestamp falls outside the platform's `SystemTime`
    /// range.
    pub fn time_sent_at(&self) -> Option<SystemTime> {
        let offset = Duration::from_millis(self.time_sent.unsigned_abs());
        if self.time_sent >= 0 {
            UNIX_EPOCH.checked_add(offset)
        } else {
            UNIX_EPOCH.checked_sub(offset)
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `None` until the receiver replies.
    pub fn reply(&self) -> Option<&str> {
        self.reply.as_deref()
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn product(&self) -> Option<&str> {
        self.product.as_deref()
    }
}

pub fn build_request(config: &ClientConfig, id: Uuid) -> HttpRequest {
    resolver::build_request(config, Resource::Review, "id", id.hyphenated().to_string())
}

pub fn parse_response(response: HttpResponse) -> Result<Option<Review>, ApiError> {
    resolver::parse_response(Resource::Review, response)
}

pub fn resolve<X>(transport: &X, config: &ClientConfig, id: Uuid) -> Result<Option<Review>, ApiError>
where
    X: Transport + ?Sized,
{
    let request = build_request(config, id);
    resolver::fetch(transport, Resource::Review, &request)
}
