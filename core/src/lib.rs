//! Blocking client for the Vouchley user and review API.
//!
//! # Overview
//! Three lookups: a user by id, a user by username, and a review by id.
//! Results are immutable snapshots (`User`, `Review`) of the service's state
//! at fetch time.
//!
//! # Design
//! - Each resolver is split into a pure `build_request` / `parse_response`
//!   pair around a `Transport` call, so request shape and response mapping
//!   are testable without a network.
//! - A non-200 status is a miss and comes back as `Ok(None)`. Transport
//!   failures and malformed bodies are distinct `ApiError` variants.
//! - Credentials live in a `ClientConfig` owned by the client; there is no
//!   global state.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
mod resolver;
pub mod review;
pub mod transport;
pub mod user;

pub use client::VouchleyClient;
pub use config::ClientConfig;
pub use error::{ApiError, Resource};
pub use http::{HttpRequest, HttpResponse};
pub use review::Review;
pub use transport::{Transport, TransportError, UreqTransport};
pub use user::{User, UserLookup};
