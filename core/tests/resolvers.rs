//! Resolver behavior against an in-process `Transport` double.
//!
//! The double records every request it is handed and replays a canned
//! outcome, so these tests pin down exactly what goes over the wire and how
//! each outcome maps to `Ok(Some)`, `Ok(None)` or `Err`.

use std::io;
use std::sync::{Arc, Mutex};

use uuid::Uuid;
use vouchley_core::{
    ApiError, ClientConfig, HttpRequest, HttpResponse, Resource, Transport, TransportError, VouchleyClient,
};

const USER_BODY: &str = r#"{
    "id": "6f1c2b9e-3d4a-4f5b-8c7d-1e2f3a4b5c6d",
    "displayName": "Alice",
    "username": "alice",
    "title": "Trusted Trader",
    "avatarURL": "https://cdn.vouchley.com/avatars/alice.png",
    "discordId": "123456789012345678",
    "averageRating": 5,
    "totalValueTraded": 1520.75,
    "donatorBadges": [1, 3]
}"#;

const REVIEW_BODY: &str = r#"{
    "id": "0b7e4c1a-9f2d-4e3b-a6c5-d4e3f2a1b0c9",
    "receiver": "6f1c2b9e-3d4a-4f5b-8c7d-1e2f3a4b5c6d",
    "sender": "a1b2c3d4-e5f6-4789-8abc-def012345678",
    "value": 42.5,
    "rating": 4,
    "timeSent": 1696118400000,
    "message": "Fast and friendly.",
    "platform": "Discord"
}"#;

#[derive(Clone)]
enum Outcome {
    Respond(u16, &'static str),
    RespondBytes(u16, &'static [u8]),
    Refuse,
}

#[derive(Clone)]
struct Recording {
    outcome: Outcome,
    sent: Arc<Mutex<Vec<HttpRequest>>>,
}

impl Recording {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            sent: Arc::default(),
        }
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for Recording {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        match self.outcome {
            Outcome::Respond(status, body) => Ok(HttpResponse::new(status, body)),
            Outcome::RespondBytes(status, body) => Ok(HttpResponse::new(status, body)),
            Outcome::Refuse => Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused").into()),
        }
    }
}

fn client(transport: Recording, config: ClientConfig) -> VouchleyClient<Recording> {
    VouchleyClient::with_transport(config.with_base_url("http://vouchley.test"), transport).unwrap()
}

fn auth_headers(request: &HttpRequest) -> Vec<&str> {
    request
        .headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case("authorization"))
        .map(|(_, value)| value.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

#[test]
fn get_user_by_id_sends_one_request_with_id_only() {
    let transport = Recording::new(Outcome::Respond(200, USER_BODY));
    let id = Uuid::new_v4();

    client(transport.clone(), ClientConfig::default()).get_user_by_id(id).unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "http://vouchley.test/api/v1/user");
    assert_eq!(sent[0].query, vec![("id".to_string(), id.to_string())]);
    assert!(auth_headers(&sent[0]).is_empty());
}

#[test]
fn get_user_by_username_sends_username_only() {
    let transport = Recording::new(Outcome::Respond(200, USER_BODY));

    for username in ["alice", "Bob_99", "name with spaces", "ümlaut&co"] {
        client(transport.clone(), ClientConfig::default())
            .get_user_by_username(username)
            .unwrap();
        let last = transport.sent().pop().unwrap();
        assert_eq!(last.query, vec![("username".to_string(), username.to_string())]);
    }
    assert_eq!(transport.sent().len(), 4);
}

#[test]
fn get_review_by_id_targets_review_endpoint() {
    let transport = Recording::new(Outcome::Respond(200, REVIEW_BODY));
    let id = Uuid::new_v4();

    client(transport.clone(), ClientConfig::default()).get_review_by_id(id).unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "http://vouchley.test/api/v1/review");
    assert_eq!(sent[0].query, vec![("id".to_string(), id.to_string())]);
}

#[test]
fn configured_key_is_sent_once_as_bearer() {
    let transport = Recording::new(Outcome::Respond(200, USER_BODY));
    let c = client(transport.clone(), ClientConfig::default().with_api_key("key-1"));

    c.get_user_by_id(Uuid::nil()).unwrap();
    c.get_review_by_id(Uuid::nil()).unwrap_err();

    for request in transport.sent() {
        assert_eq!(auth_headers(&request), vec!["Bearer key-1"]);
    }
}

#[test]
fn replaced_key_is_never_stale() {
    let transport = Recording::new(Outcome::Respond(200, USER_BODY));
    let c = client(transport.clone(), ClientConfig::default().with_api_key("old-key"));
    c.get_user_by_username("alice").unwrap();

    let c = c.with_api_key("new-key");
    c.get_user_by_username("alice").unwrap();

    let sent = transport.sent();
    assert_eq!(auth_headers(&sent[0]), vec!["Bearer old-key"]);
    assert_eq!(auth_headers(&sent[1]), vec!["Bearer new-key"]);
}

// ---------------------------------------------------------------------------
// Outcome mapping
// ---------------------------------------------------------------------------

#[test]
fn found_user_matches_body() {
    let c = client(Recording::new(Outcome::Respond(200, USER_BODY)), ClientConfig::default());
    let user = c.get_user_by_username("alice").unwrap().unwrap();
    assert_eq!(user.username(), "alice");
    assert_eq!(user.display_name(), Some("Alice"));
    assert_eq!(user.donator_badges(), &[1, 3]);
    assert!(user.reviews().is_none());
}

#[test]
fn found_review_without_optionals() {
    let c = client(Recording::new(Outcome::Respond(200, REVIEW_BODY)), ClientConfig::default());
    let review = c.get_review_by_id(Uuid::nil()).unwrap().unwrap();
    assert_eq!(review.reply(), None);
    assert_eq!(review.product(), None);
    assert_eq!(review.message(), "Fast and friendly.");
}

#[test]
fn non_200_is_a_miss_not_an_error() {
    for status in [400, 401, 403, 404, 500, 502] {
        let c = client(Recording::new(Outcome::Respond(status, "")), ClientConfig::default());
        assert!(c.get_user_by_id(Uuid::nil()).unwrap().is_none(), "user, status {status}");
        assert!(c.get_review_by_id(Uuid::nil()).unwrap().is_none(), "review, status {status}");
    }
}

#[test]
fn transport_failure_is_remote_fetch_error() {
    let c = client(Recording::new(Outcome::Refuse), ClientConfig::default());

    let err = c.get_user_by_id(Uuid::nil()).unwrap_err();
    assert!(matches!(err, ApiError::RemoteFetch { resource: Resource::User, .. }));
    assert!(err.to_string().starts_with("user retrieval failed"));

    let err = c.get_review_by_id(Uuid::nil()).unwrap_err();
    assert!(matches!(err, ApiError::RemoteFetch { resource: Resource::Review, .. }));
    assert!(err.to_string().starts_with("review retrieval failed"));
}

#[test]
fn missing_required_field_fails_deterministically() {
    let body: &'static str = Box::leak(USER_BODY.replace(r#""username": "alice","#, "").into_boxed_str());
    let c = client(Recording::new(Outcome::Respond(200, body)), ClientConfig::default());

    for _ in 0..3 {
        let err = c.get_user_by_id(Uuid::nil()).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { resource: Resource::User, .. }));
    }
}

#[test]
fn wrong_shape_for_resource_is_malformed() {
    // A user body handed to the review resolver.
    let c = client(Recording::new(Outcome::Respond(200, USER_BODY)), ClientConfig::default());
    let err = c.get_review_by_id(Uuid::nil()).unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse { resource: Resource::Review, .. }));
}

#[test]
fn non_utf8_body_is_malformed_not_remote_fetch() {
    let c = client(Recording::new(Outcome::RespondBytes(200, b"{\xff\xfe}")), ClientConfig::default());

    let err = c.get_user_by_username("alice").unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse { resource: Resource::User, .. }));

    let err = c.get_review_by_id(Uuid::nil()).unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse { resource: Resource::Review, .. }));
}

#[test]
fn non_utf8_body_on_a_miss_is_still_a_miss() {
    let c = client(Recording::new(Outcome::RespondBytes(404, b"\xff\xfe")), ClientConfig::default());
    assert!(c.get_user_by_id(Uuid::nil()).unwrap().is_none());
}
