//! User records and the user resolver.
//!
//! # Design
//! `User` deserializes straight from the service's JSON, so a missing or
//! mistyped required field fails the whole parse and no partially-filled
//! user can be observed. Reviews are never part of the user payload; the
//! `reviews` slot stays `None` unless the caller attaches some with
//! `User::with_reviews`.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ApiError, Resource};
use crate::http::{HttpRequest, HttpResponse};
use crate::resolver;
use crate::review::Review;
use crate::transport::Transport;

/// How a user is looked up. Exactly one of these becomes the request's
/// single query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLookup<'a> {
    Id(Uuid),
    Username(&'a str),
}

impl UserLookup<'_> {
    fn query(&self) -> (&'static str, String) {
        match self {
            UserLookup::Id(id) => ("id", id.hyphenated().to_string()),
            UserLookup::Username(username) => ("username", (*username).to_string()),
        }
    }
}

/// Snapshot of a Vouchley user at fetch time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: Uuid,
    #[serde(default)]
    display_name: Option<String>,
    username: String,
    title: String,
    #[serde(rename = "avatarURL")]
    avatar_url: String,
    discord_id: String,
    #[serde(skip)]
    reviews: Option<Vec<Review>>,
    average_rating: i32,
    total_value_traded: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    donator_badges: Vec<i32>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<i32>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl User {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// May be empty.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The service substitutes its default avatar when the user has none.
    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    /// May be empty.
    pub fn discord_id(&self) -> &str {
        &self.discord_id
    }

    /// `None` unless reviews were attached with [`User::with_reviews`].
    pub fn reviews(&self) -> Option<&[Review]> {
        self.reviews.as_deref()
    }

    pub fn average_rating(&self) -> i32 {
        self.average_rating
    }

    pub fn total_value_traded(&self) -> f64 {
        self.total_value_traded
    }

    pub fn donator_badges(&self) -> &[i32] {
        &self.donator_badges
    }

    /// Return a copy of this snapshot with `reviews` attached.
    pub fn with_reviews(self, reviews: Vec<Review>) -> Self {
        Self {
            reviews: Some(reviews),
            ..self
        }
    }
}

pub fn build_request(config: &ClientConfig, lookup: UserLookup<'_>) -> HttpRequest {
    let (key, value) = lookup.query();
    resolver::build_request(config, Resource::User, key, value)
}

pub fn parse_response(response: HttpResponse) -> Result<Option<User>, ApiError> {
    resolver::parse_response(Resource::User, response)
}

/// Fetch one user. `Ok(None)` means the service answered with anything
/// other than 200.
pub fn resolve<X>(transport: &X, config: &ClientConfig, lookup: UserLookup<'_>) -> Result<Option<User>, ApiError>
where
    X: Transport + ?Sized,
{
    let request = build_request(config, lookup);
    resolver::fetch(transport, Resource::User, &request)
}
