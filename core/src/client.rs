//! Blocking client facade for the Vouchley API.
//!
//! # Design
//! `VouchleyClient` owns a `ClientConfig` and a `Transport` and nothing
//! else. Each lookup is a straight pass-through to the user or review
//! resolver, so the facade adds no behavior of its own.
//!
//! Every lookup performs network I/O on the calling thread. Do not call
//! these methods from a thread that must not block (UI loops, async
//! executors); move them onto a worker thread or `spawn_blocking` instead.

use std::fmt;

use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::review::{self, Review};
use crate::transport::{Transport, UreqTransport};
use crate::user::{self, User, UserLookup};

/// Read-only client for user and review lookups.
///
/// Lookups return `Ok(None)` when the service has no matching record (any
/// non-200 status) and `Err` only for transport failures or bodies that do
/// not match the expected shape.
#[derive(Clone)]
pub struct VouchleyClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl VouchleyClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }

    /// Build a client from `VOUCHLEY_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> VouchleyClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_key(&self) -> Option<&str> {
        self.config.api_key()
    }

    /// Replace the API key used by every subsequent lookup on the returned
    /// client.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config = self.config.with_api_key(api_key);
        self
    }

    pub fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        user::resolve(&self.transport, &self.config, UserLookup::Id(id))
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        user::resolve(&self.transport, &self.config, UserLookup::Username(username))
    }

    pub fn get_review_by_id(&self, id: Uuid) -> Result<Option<Review>, ApiError> {
        review::resolve(&self.transport, &self.config, id)
    }
}

impl<T> fmt::Debug for VouchleyClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VouchleyClient").field("config", &self.config).finish_non_exhaustive()
    }
}
