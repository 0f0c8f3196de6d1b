use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;
use uuid::Uuid;

pub const ALICE_ID: Uuid = Uuid::from_u128(0x6f1c2b9e_3d4a_4f5b_8c7d_1e2f3a4b5c6d);
pub const BOB_ID: Uuid = Uuid::from_u128(0xa1b2c3d4_e5f6_4789_8abc_def012345678);
pub const REPLIED_REVIEW_ID: Uuid = Uuid::from_u128(0x0b7e4c1a_9f2d_4e3b_a6c5_d4e3f2a1b0c9);
pub const BARE_REVIEW_ID: Uuid = Uuid::from_u128(0x5d6e7f80_1a2b_4c3d_9e8f_7a6b5c4d3e2f);

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub username: String,
    pub title: String,
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
    pub discord_id: String,
    pub average_rating: i32,
    pub total_value_traded: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donator_badges: Option<Vec<i32>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: Uuid,
    pub receiver: Uuid,
    pub sender: Uuid,
    pub value: f64,
    pub rating: i32,
    pub time_sent: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Db {
    pub users: HashMap<Uuid, UserRecord>,
    pub reviews: HashMap<Uuid, ReviewRecord>,
}

impl Db {
    /// Two users and two reviews covering every optional field both set and
    /// absent.
    pub fn fixtures() -> Self {
        let users = [
            UserRecord {
                id: ALICE_ID,
                display_name: Some("Alice".to_string()),
                username: "alice".to_string(),
                title: "Trusted Trader".to_string(),
                avatar_url: "https://cdn.vouchley.com/avatars/alice.png".to_string(),
                discord_id: "123456789012345678".to_string(),
                average_rating: 5,
                total_value_traded: 1520.75,
                donator_badges: Some(vec![1, 3]),
            },
            UserRecord {
                id: BOB_ID,
                display_name: None,
                username: "bob".to_string(),
                title: String::new(),
                avatar_url: "https://cdn.vouchley.com/avatars/default.png".to_string(),
                discord_id: String::new(),
                average_rating: 0,
                total_value_traded: 0.0,
                donator_badges: None,
            },
        ];
        let reviews = [
            ReviewRecord {
                id: REPLIED_REVIEW_ID,
                receiver: ALICE_ID,
                sender: BOB_ID,
                value: 42.5,
                rating: 4,
                time_sent: 1_696_118_400_000,
                message: "Fast and friendly.".to_string(),
                reply: Some("Thanks!".to_string()),
                platform: "Discord".to_string(),
                product: Some("Nitro".to_string()),
            },
            ReviewRecord {
                id: BARE_REVIEW_ID,
                receiver: BOB_ID,
                sender: ALICE_ID,
                value: 10.0,
                rating: 3,
                time_sent: 1_700_000_000_000,
                message: "Took a while but arrived.".to_string(),
                reply: None,
                platform: "Website".to_string(),
                product: None,
            },
        ];

        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            reviews: reviews.into_iter().map(|r| (r.id, r)).collect(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Db>,
    /// When set, every request must carry `Authorization: Bearer <key>`.
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
pub struct UserQuery {
    pub id: Option<Uuid>,
    pub username: Option<String>,
}

#[derive(Deserialize)]
pub struct ReviewQuery {
    pub id: Uuid,
}

/// Router over the fixture data with authentication disabled.
pub fn app() -> Router {
    app_with(AppState {
        db: Arc::new(Db::fixtures()),
        api_key: None,
    })
}

pub fn app_with(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/user", get(get_user))
        .route("/api/v1/review", get(get_review))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: Option<String>) -> Result<(), std::io::Error> {
    let state = AppState {
        db: Arc::new(Db::fixtures()),
        api_key,
    };
    axum::serve(listener, app_with(state)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let Some(key) = &state.api_key else {
        return Ok(());
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if presented == Some(key.as_str()) {
        Ok(())
    } else {
        debug!("rejecting request with missing or wrong api key");
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UserQuery>,
) -> Result<Json<UserRecord>, StatusCode> {
    authorize(&state, &headers)?;
    let user = match (query.id, query.username) {
        (Some(id), None) => state.db.users.get(&id),
        (None, Some(username)) => state.db.users.values().find(|u| u.username == username),
        _ => return Err(StatusCode::BAD_REQUEST),
    };
    user.cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReviewQuery>,
) -> Result<Json<ReviewRecord>, StatusCode> {
    authorize(&state, &headers)?;
    state.db.reviews.get(&query.id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}
